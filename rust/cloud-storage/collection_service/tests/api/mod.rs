mod test_collections;
mod test_health;
mod test_versions;
