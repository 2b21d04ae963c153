pub mod health;
pub mod params;
pub mod recommend;
pub mod vendors;

#[cfg(test)]
pub(crate) mod test_support;
