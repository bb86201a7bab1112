use chrono::{DateTime, Datelike, Utc};

/// Format a history timestamp:
/// - Relative under 7 days: "agora", "há 5 min", "há 3 h", "há 2 d"
/// - Absolute otherwise: "15/01", or "03/12/2024" for other years
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_at(timestamp, &Utc::now())
}

fn format_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);

    if elapsed.num_days() >= 7 {
        return if timestamp.year() == now.year() {
            timestamp.format("%d/%m").to_string()
        } else {
            timestamp.format("%d/%m/%Y").to_string()
        };
    }

    // Clock skew can put entries slightly in the future
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "agora".to_string()
    } else if minutes < 60 {
        format!("há {} min", minutes)
    } else if elapsed.num_hours() < 24 {
        format!("há {} h", elapsed.num_hours())
    } else {
        format!("há {} d", elapsed.num_days())
    }
}
