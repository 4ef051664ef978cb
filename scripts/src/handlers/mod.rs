pub mod feature_init;
