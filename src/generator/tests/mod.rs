#[cfg(test)]
pub mod common;

#[cfg(test)]
mod test_party_generation;
