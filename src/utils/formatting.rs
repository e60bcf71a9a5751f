pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else if ms < 3_600_000 {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = ms / 3_600_000;
        let mins = (ms % 3_600_000) / 60_000;
        format!("{}h {}m", hours, mins)
    }
}

/// `passed/evaluated (rate%)`, or `-` when nothing was evaluated.
pub fn format_pass_rate(passed: usize, evaluated: usize) -> String {
    if evaluated == 0 {
        return "-".into();
    }
    let pct = passed as f64 / evaluated as f64 * 100.0;
    format!("{}/{} ({:.0}%)", passed, evaluated, pct)
}

pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
