use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_env() {
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("PORT");
        std::env::remove_var("DB_MAX_CONNECTIONS");
        std::env::remove_var("THUMBNAIL_WIDTH");
        std::env::remove_var("THUMBNAIL_HEIGHT");
        std::env::remove_var("DEFAULT_PRODUCTS_PER_PAGE");
    }
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: usize = env_parse("__BROCHURE_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__BROCHURE_TEST_VALID__", " 99 ") };
    let val: u16 = env_parse("__BROCHURE_TEST_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__BROCHURE_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__BROCHURE_TEST_INVALID__", "lots") };
    let val: u32 = env_parse("__BROCHURE_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__BROCHURE_TEST_INVALID__") };
}

// =============================================================================
// Config::from_env
// =============================================================================

// One test so the process-wide environment is never mutated concurrently.
#[test]
fn from_env_reads_variables() {
    unsafe { clear_env() };
    assert_eq!(Config::from_env(), Err(ConfigError::Missing("DATABASE_URL")));

    unsafe { std::env::set_var("DATABASE_URL", "   ") };
    assert_eq!(Config::from_env(), Err(ConfigError::Missing("DATABASE_URL")));

    // Defaults.
    unsafe { std::env::set_var("DATABASE_URL", "postgres://localhost/brochure") };
    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.database_url, "postgres://localhost/brochure");
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert!((cfg.thumbnail_width - 200.0).abs() < f64::EPSILON);
    assert!((cfg.thumbnail_height - 160.0).abs() < f64::EPSILON);
    assert_eq!(cfg.default_products_per_page, 4);

    // Overrides, with out-of-range values clamped or ignored.
    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("DB_MAX_CONNECTIONS", "0");
        std::env::set_var("THUMBNAIL_WIDTH", "-10");
        std::env::set_var("THUMBNAIL_HEIGHT", "320");
        std::env::set_var("DEFAULT_PRODUCTS_PER_PAGE", "12");
    }
    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.db_max_connections, 1);
    assert!((cfg.thumbnail_width - 200.0).abs() < f64::EPSILON);
    assert!((cfg.thumbnail_height - 320.0).abs() < f64::EPSILON);
    assert_eq!(cfg.default_products_per_page, 8);

    unsafe { clear_env() };
}
