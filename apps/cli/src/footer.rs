//! The "generated by" stamp appended after the document.

use chrono::{DateTime, Local};

/// Render the footer as an RST comment naming the user and local time.
pub(crate) fn footer(user: &str, at: DateTime<Local>) -> String {
    format!(
        "\n\n.. generated using get-rst by {user} at {}\n\n",
        at.format("%B/%d/%Y  %H:%M:%S")
    )
}

/// Login name of whoever runs the tool.
pub(crate) fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn footer_is_an_rst_comment() {
        let at = Local
            .with_ymd_and_hms(2026, 10, 19, 9, 5, 7)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            footer("alex", at),
            "\n\n.. generated using get-rst by alex at October/19/2026  09:05:07\n\n"
        );
    }

    #[test]
    fn current_user_is_never_empty() {
        assert!(!current_user().is_empty());
    }
}
