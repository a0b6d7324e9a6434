pub mod department;
pub mod department_resolver;
pub mod frontend_code;
pub mod linking_service;
pub mod pass_rate;

#[cfg(test)]
pub(crate) mod test_support;
