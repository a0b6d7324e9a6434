pub mod auth;
pub mod crud;
pub mod errors;
pub mod list;
pub mod models;
pub mod state;
pub mod views;

#[cfg(test)]
pub mod test_helpers;
#[cfg(test)]
mod tests;
