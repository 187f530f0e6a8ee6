mod schema_test;
mod transport_test;
