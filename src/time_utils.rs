use js_sys::Date;
use wasm_bindgen::JsValue;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// `dd Mon yyyy, h:mm AM` for epoch seconds, from the UTC components.
///
/// Chart times are already shifted by the local offset, so the UTC
/// components are local wall time.
pub fn format_date_time(secs: i64) -> String {
    let date = Date::new(&JsValue::from_f64(secs as f64 * 1000.0));
    let hour = date.get_utc_hours();
    let (hour12, meridiem) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!(
        "{:02} {} {}, {}:{:02} {}",
        date.get_utc_date(),
        MONTHS[date.get_utc_month() as usize % 12],
        date.get_utc_full_year(),
        hour12,
        date.get_utc_minutes(),
        meridiem
    )
}

/// `{d}d {h}h {m}m` until `target`, `None` once it has passed.
pub fn format_time_till(target_secs: i64, now_secs: i64) -> Option<String> {
    let diff = target_secs - now_secs;
    if diff < 0 {
        return None;
    }
    let days = diff / 86_400;
    let hours = (diff % 86_400) / 3_600;
    let minutes = (diff % 3_600) / 60;
    Some(format!("{}d {}h {}m", days, hours, minutes))
}
