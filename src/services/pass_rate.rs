/// Percentage of tested units that passed, rounded half-up.
///
/// Returns 0 when nothing was tested. `passed <= tested` is enforced by
/// request validation, not here; if it does not hold the result exceeds 100.
pub fn pass_rate(tested: u32, passed: u32) -> u64 {
    if tested == 0 {
        return 0;
    }
    let (tested, passed) = (u64::from(tested), u64::from(passed));
    // floor(passed * 100 / tested + 0.5), in integers
    (passed * 200 + tested) / (tested * 2)
}
