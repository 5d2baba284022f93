//! Pay report aggregation and rendering.
//!
//! A [`Report`] is computed once from the paired sessions and then rendered
//! as a spreadsheet-friendly CSV, a console listing, or JSON.

use std::io::{self, Write};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::TIMESTAMP_FORMAT;
use crate::pairing::{Notice, Session, WageConfig};

/// UTF-8 byte-order mark. Spreadsheet tools need it to decode Hangul headers.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV header: date, clock-in time, clock-out time, hours worked, pay.
pub const CSV_HEADER: [&str; 5] = ["날짜", "출근시간", "퇴근시간", "근무시간", "급여"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Totals over a run's sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub sessions: Vec<Session>,
    pub hourly_rate: f64,
    pub total_hours: f64,
    pub total_wage: f64,
}

impl Report {
    pub fn new(sessions: Vec<Session>, config: &WageConfig) -> Self {
        let total_hours = sessions.iter().map(|s| s.duration_hours).sum();
        let total_wage = sessions.iter().map(|s| s.wage).sum();
        Self {
            sessions,
            hourly_rate: config.hourly_rate(),
            total_hours,
            total_wage,
        }
    }
}

// ========== Formatting ==========

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Formats hours with two decimals.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// Truncates a currency amount to whole units.
#[allow(clippy::cast_possible_truncation)]
pub fn whole_units(amount: f64) -> i64 {
    amount.trunc() as i64
}

/// Groups digits in threes: `80240` -> `80,240`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_rate(rate: f64) -> String {
    if rate.fract().abs() < f64::EPSILON {
        group_thousands(whole_units(rate))
    } else {
        format!("{rate:.2}")
    }
}

// ========== CSV ==========

/// Writes the report as CSV, one row per session.
///
/// Output is BOM-prefixed with CRLF line endings, which is what spreadsheet
/// tools expect from a Hangul-headed file.
pub fn write_csv<W: Write>(report: &Report, mut writer: W) -> Result<(), csv::Error> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for session in &report.sessions {
        csv.write_record([
            session.start.format(DATE_FORMAT).to_string(),
            format_timestamp(session.start),
            format_timestamp(session.end),
            format_hours(session.duration_hours),
            whole_units(session.wage).to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

// ========== Console listing ==========

/// Writes the human-readable pay report.
pub fn write_listing<W: Write>(report: &Report, notices: &[Notice], mut w: W) -> io::Result<()> {
    writeln!(w, "COMMUTE PAY REPORT")?;
    writeln!(w, "Hourly rate: {}", format_rate(report.hourly_rate))?;

    if !notices.is_empty() {
        writeln!(w)?;
        writeln!(w, "NOTICES")?;
        writeln!(w, "───────")?;
        for notice in notices {
            writeln!(w, "{notice}")?;
        }
    }

    writeln!(w)?;
    writeln!(w, "SESSIONS")?;
    writeln!(w, "────────")?;
    if report.sessions.is_empty() {
        writeln!(w, "No completed shifts.")?;
    }
    for session in &report.sessions {
        writeln!(
            w,
            "{} ~ {} | {}h | {}",
            format_timestamp(session.start),
            format_timestamp(session.end),
            format_hours(session.duration_hours),
            group_thousands(whole_units(session.wage)),
        )?;
    }

    writeln!(w)?;
    writeln!(w, "TOTAL")?;
    writeln!(w, "─────")?;
    writeln!(w, "Hours worked: {}", format_hours(report.total_hours))?;
    writeln!(
        w,
        "Expected pay: {}",
        group_thousands(whole_units(report.total_wage))
    )?;

    Ok(())
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub hourly_rate: f64,
    pub sessions: Vec<JsonSession>,
    pub notices: Vec<String>,
    pub totals: JsonTotals,
}

#[derive(Debug, Serialize)]
pub struct JsonSession {
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration_hours: f64,
    pub wage: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub hours: f64,
    pub wage: i64,
    pub session_count: usize,
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

impl JsonReport {
    pub fn new(report: &Report, notices: &[Notice]) -> Self {
        Self {
            hourly_rate: report.hourly_rate,
            sessions: report
                .sessions
                .iter()
                .map(|s| JsonSession {
                    date: s.start.format(DATE_FORMAT).to_string(),
                    start: format_timestamp(s.start),
                    end: format_timestamp(s.end),
                    duration_hours: round_hours(s.duration_hours),
                    wage: whole_units(s.wage),
                })
                .collect(),
            notices: notices.iter().map(ToString::to_string).collect(),
            totals: JsonTotals {
                hours: round_hours(report.total_hours),
                wage: whole_units(report.total_wage),
                session_count: report.sessions.len(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn sample_report() -> Report {
        let config = WageConfig::default();
        let sessions = vec![
            Session::new(ts("2025-03-20 10:00:00"), ts("2025-03-20 18:00:00"), &config),
            Session::new(ts("2025-03-20 23:00:00"), ts("2025-03-21 01:20:00"), &config),
        ];
        Report::new(sessions, &config)
    }

    // ========== Aggregation ==========

    #[test]
    fn test_totals_are_sums_of_sessions() {
        let report = sample_report();
        let hours: f64 = report.sessions.iter().map(|s| s.duration_hours).sum();
        let wage: f64 = report.sessions.iter().map(|s| s.wage).sum();
        assert!((report.total_hours - hours).abs() < 1e-9);
        assert!((report.total_wage - wage).abs() < 1e-9);
        assert!((report.total_hours - 31.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report_totals_are_zero() {
        let report = Report::new(Vec::new(), &WageConfig::default());
        assert!(report.total_hours.abs() < f64::EPSILON);
        assert!(report.total_wage.abs() < f64::EPSILON);
    }

    // ========== Formatting ==========

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(80_240), "80,240");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-1_234), "-1,234");
    }

    #[test]
    fn test_whole_units_truncates() {
        assert_eq!(whole_units(23_403.33), 23_403);
        assert_eq!(whole_units(0.99), 0);
    }

    #[test]
    fn test_format_hours_two_decimals() {
        assert_eq!(format_hours(8.0), "8.00");
        assert_eq!(format_hours(2.0 + 1.0 / 3.0), "2.33");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(10_030.0), "10,030");
        assert_eq!(format_rate(9_860.5), "9860.50");
    }

    // ========== CSV ==========

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let mut out = Vec::new();
        write_csv(&sample_report(), &mut out).unwrap();

        assert!(out.starts_with(UTF8_BOM));
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.split("\r\n");
        assert_eq!(lines.next(), Some("날짜,출근시간,퇴근시간,근무시간,급여"));
    }

    #[test]
    fn test_csv_rows() {
        let mut out = Vec::new();
        write_csv(&sample_report(), &mut out).unwrap();
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();

        let rows: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(
            rows,
            vec![
                "날짜,출근시간,퇴근시간,근무시간,급여",
                "2025-03-20,2025-03-20 10:00:00,2025-03-20 18:00:00,8.00,80240",
                "2025-03-20,2025-03-20 23:00:00,2025-03-21 01:20:00,2.33,23403",
                "",
            ]
        );
    }

    #[test]
    fn test_csv_empty_report_is_header_only() {
        let mut out = Vec::new();
        write_csv(&Report::new(Vec::new(), &WageConfig::default()), &mut out).unwrap();
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "날짜,출근시간,퇴근시간,근무시간,급여\r\n");
    }

    // ========== Listing ==========

    #[test]
    fn test_listing_with_sessions() {
        let notices = [Notice::OrphanClockOut {
            at: ts("2025-03-19 19:00:00"),
        }];
        let mut out = Vec::new();
        write_listing(&sample_report(), &notices, &mut out).unwrap();

        assert_snapshot!(String::from_utf8(out).unwrap(), @r"
COMMUTE PAY REPORT
Hourly rate: 10,030

NOTICES
───────
clock-out at 2025-03-19 19:00:00 has no matching clock-in

SESSIONS
────────
2025-03-20 10:00:00 ~ 2025-03-20 18:00:00 | 8.00h | 80,240
2025-03-20 23:00:00 ~ 2025-03-21 01:20:00 | 2.33h | 23,403

TOTAL
─────
Hours worked: 10.33
Expected pay: 103,643
");
    }

    #[test]
    fn test_listing_empty() {
        let mut out = Vec::new();
        write_listing(&Report::new(Vec::new(), &WageConfig::default()), &[], &mut out).unwrap();

        assert_snapshot!(String::from_utf8(out).unwrap(), @r"
COMMUTE PAY REPORT
Hourly rate: 10,030

SESSIONS
────────
No completed shifts.

TOTAL
─────
Hours worked: 0.00
Expected pay: 0
");
    }

    // ========== JSON ==========

    #[test]
    fn test_json_report() {
        let json = JsonReport::new(&sample_report(), &[]);
        let output = serde_json::to_string_pretty(&json).unwrap();
        assert_snapshot!(output, @r#"
{
  "hourly_rate": 10030.0,
  "sessions": [
    {
      "date": "2025-03-20",
      "start": "2025-03-20 10:00:00",
      "end": "2025-03-20 18:00:00",
      "duration_hours": 8.0,
      "wage": 80240
    },
    {
      "date": "2025-03-20",
      "start": "2025-03-20 23:00:00",
      "end": "2025-03-21 01:20:00",
      "duration_hours": 2.33,
      "wage": 23403
    }
  ],
  "notices": [],
  "totals": {
    "hours": 10.33,
    "wage": 103643,
    "session_count": 2
  }
}
"#);
    }
}
