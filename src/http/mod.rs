pub mod middleware;
pub mod router;
#[cfg(test)]
pub mod tests;
