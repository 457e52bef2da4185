use js_sys::Date;

pub fn now_ms() -> u64 {
    Date::now().max(0.0) as u64
}

pub fn now_secs() -> i64 {
    (Date::now() / 1_000.0) as i64
}

/// Local date as `YYYY-MM-DD`, the format `<input type="date">` expects.
pub fn today() -> String {
    let d = Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date()
    )
}

/// Local `YYYYMMDD_HHMMSS`, used for fallback export file names.
pub fn timestamp() -> String {
    let d = Date::new_0();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date(),
        d.get_hours(),
        d.get_minutes(),
        d.get_seconds()
    )
}
