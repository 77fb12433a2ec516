//! Stats command: unit totals per reporting window.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use birrino_core::{Period, TimeWindow, date_range, sum_units_in};
use birrino_db::Database;

use crate::cli::StatsArgs;
use crate::commands::util::progress_bar;
use crate::config::Config;

/// One reporting window with its unit total.
#[derive(Debug, Serialize)]
struct PeriodStats {
    period: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    units: f64,
}

/// JSON envelope for `stats --json`.
#[derive(Debug, Serialize)]
struct StatsData {
    generated_at: DateTime<Utc>,
    timezone: String,
    weekly_limit: f64,
    monthly_estimate: f64,
    periods: Vec<PeriodStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_week_units: Option<f64>,
}

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &Database,
    args: &StatsArgs,
    config: &Config,
    now: DateTime<Tz>,
) -> Result<()> {
    let now_utc = now.with_timezone(&Utc);

    // Resolve which windows to report. An unknown period name falls back to
    // a zero-width window at "now" instead of erroring.
    let windows: Vec<(String, TimeWindow<Utc>)> = match &args.period {
        Some(name) => {
            let window = name.parse::<Period>().map_or_else(
                |err| {
                    tracing::warn!(%err, "falling back to a zero-width window");
                    TimeWindow::instant(now_utc)
                },
                |period| to_utc_window(date_range(period, now.clone())),
            );
            vec![(name.clone(), window)]
        }
        None => Period::ALL
            .into_iter()
            .map(|period| {
                (
                    period.to_string(),
                    to_utc_window(date_range(period, now.clone())),
                )
            })
            .collect(),
    };

    // The week-over-week comparison needs one extra trailing window.
    let week_window = windows
        .iter()
        .find(|(name, _)| name == "week")
        .map(|(_, window)| window.clone());
    let previous_week = week_window.as_ref().map(|week| TimeWindow {
        start: week.start - Duration::days(7),
        end: week.start - Duration::milliseconds(1),
    });

    // One query covers every window: fetch from the earliest start.
    let earliest = windows
        .iter()
        .map(|(_, window)| window.start)
        .chain(previous_week.iter().map(|window| window.start))
        .min()
        .unwrap_or(now_utc);
    let events = db.consumptions_between(earliest, now_utc)?;

    let periods: Vec<PeriodStats> = windows
        .into_iter()
        .map(|(period, window)| PeriodStats {
            period,
            units: sum_units_in(&window, &events),
            start: window.start,
            end: window.end,
        })
        .collect();
    let previous_week_units =
        previous_week.map(|window| sum_units_in(&window, &events));

    let data = StatsData {
        generated_at: now_utc,
        timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
        weekly_limit: config.weekly_limit,
        monthly_estimate: config.monthly_estimate,
        periods,
        previous_week_units,
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &data)?;
        writeln!(writer)?;
        return Ok(());
    }

    render(writer, &data)
}

fn to_utc_window<Tz: TimeZone>(window: TimeWindow<Tz>) -> TimeWindow<Utc> {
    TimeWindow {
        start: window.start.with_timezone(&Utc),
        end: window.end.with_timezone(&Utc),
    }
}

fn render<W: Write>(writer: &mut W, data: &StatsData) -> Result<()> {
    writeln!(writer, "Consumption summary")?;
    writeln!(writer)?;

    let mut week_units = None;
    let mut month_units = None;
    for entry in &data.periods {
        match entry.period.as_str() {
            "week" => {
                week_units = Some(entry.units);
                let bar = progress_bar(entry.units, data.weekly_limit);
                writeln!(
                    writer,
                    "{:<8} {:>6.1} / {} units  [{bar}]",
                    entry.period, entry.units, data.weekly_limit
                )?;
            }
            "month" => {
                month_units = Some(entry.units);
                let bar = progress_bar(entry.units, data.monthly_estimate);
                writeln!(
                    writer,
                    "{:<8} {:>6.1} / {} units  [{bar}]",
                    entry.period, entry.units, data.monthly_estimate
                )?;
            }
            _ => writeln!(writer, "{:<8} {:>6.1} units", entry.period, entry.units)?,
        }
    }

    if let Some(previous) = data.previous_week_units {
        writeln!(writer)?;
        writeln!(writer, "Previous week: {previous:.1} units")?;
    }

    if week_units.is_some_and(|units| units > data.weekly_limit) {
        writeln!(writer)?;
        // The app's namesake warning: past the 14-unit line you are
        // officially at the fifth birrino.
        writeln!(writer, "Sei già al 5° Birrino: occhio!")?;
    }
    if month_units.is_some_and(|units| units > data.monthly_estimate) {
        writeln!(writer)?;
        writeln!(
            writer,
            "Monthly total exceeds the {}-unit estimate.",
            data.monthly_estimate
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use insta::assert_snapshot;

    use birrino_core::{Consumption, ConsumptionId, DrinkId};

    use crate::commands::drinks;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        let mut sink = Vec::new();
        drinks::add(&mut sink, &db, "Birra media", "beer", 330.0, 5.0).unwrap();
        db
    }

    fn rome_evening() -> DateTime<FixedOffset> {
        // 20:30 local, UTC+1
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, 20, 30, 0)
            .unwrap()
    }

    fn insert(db: &Database, id: &str, units: f64, ts: DateTime<Utc>) {
        db.insert_consumption(&Consumption {
            id: ConsumptionId::new(id).unwrap(),
            drink_id: DrinkId::new("birra-media").unwrap(),
            quantity: 1.0,
            units,
            timestamp: ts,
        })
        .unwrap();
    }

    fn stats_args(period: Option<&str>, json: bool) -> StatsArgs {
        StatsArgs {
            period: period.map(str::to_string),
            json,
        }
    }

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn all_periods_with_buckets() {
        let db = setup();
        let now = rome_evening();
        let now_utc = now.with_timezone(&Utc);

        insert(&db, "tonight", 1.65, now_utc - Duration::hours(1));
        insert(&db, "this-morning", 1.65, now_utc - Duration::hours(12));
        insert(&db, "three-days-ago", 3.3, now_utc - Duration::days(3));
        insert(&db, "three-weeks-ago", 5.0, now_utc - Duration::weeks(3));
        insert(&db, "last-summer", 8.0, now_utc - Duration::days(200));

        let mut output = Vec::new();
        run(&mut output, &db, &stats_args(None, false), &test_config(), now).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Consumption summary

        evening     1.6 units
        day         3.3 units
        week        6.6 / 14 units  [█████░░░░░]
        month      11.6 / 60 units  [██░░░░░░░░]
        year       19.6 units

        Previous week: 0.0 units
        ");
    }

    #[test]
    fn weekly_limit_warning() {
        let db = setup();
        let now = rome_evening();
        let now_utc = now.with_timezone(&Utc);

        insert(&db, "binge", 15.0, now_utc - Duration::days(2));

        let mut output = Vec::new();
        run(&mut output, &db, &stats_args(Some("week"), false), &test_config(), now).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("15.0 / 14 units"));
        assert!(output.contains("Sei già al 5° Birrino: occhio!"));
    }

    #[test]
    fn monthly_estimate_warning() {
        let db = setup();
        let now = rome_evening();
        let now_utc = now.with_timezone(&Utc);

        // Outside the trailing week but inside the trailing month
        insert(&db, "steady-habit", 61.0, now_utc - Duration::days(10));

        let mut output = Vec::new();
        run(&mut output, &db, &stats_args(None, false), &test_config(), now).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("61.0 / 60 units"));
        assert!(output.contains("exceeds the 60-unit estimate"));
        assert!(!output.contains("Sei già"));
    }

    #[test]
    fn previous_week_comparison() {
        let db = setup();
        let now = rome_evening();
        let now_utc = now.with_timezone(&Utc);

        insert(&db, "last-week", 4.0, now_utc - Duration::days(10));

        let mut output = Vec::new();
        run(&mut output, &db, &stats_args(None, false), &test_config(), now).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Previous week: 4.0 units"));
    }

    #[test]
    fn unknown_period_uses_zero_width_window() {
        let db = setup();
        let now = rome_evening();
        let now_utc = now.with_timezone(&Utc);

        insert(&db, "tonight", 1.65, now_utc - Duration::hours(1));
        // A drink logged exactly at "now" is the only thing a zero-width
        // window can contain.
        insert(&db, "right-now", 2.0, now_utc);

        let mut output = Vec::new();
        run(&mut output, &db, &stats_args(Some("fortnight"), true), &test_config(), now).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["periods"][0]["period"], "fortnight");
        assert!((parsed["periods"][0]["units"].as_f64().unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(parsed["periods"][0]["start"], parsed["periods"][0]["end"]);
    }

    #[test]
    fn json_output_has_all_windows() {
        let db = setup();
        let now = rome_evening();

        let mut output = Vec::new();
        run(&mut output, &db, &stats_args(None, true), &test_config(), now).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let names: Vec<_> = parsed["periods"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["period"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["evening", "day", "week", "month", "year"]);
        assert!((parsed["weekly_limit"].as_f64().unwrap() - 14.0).abs() < 1e-9);
        assert!((parsed["monthly_estimate"].as_f64().unwrap() - 60.0).abs() < 1e-9);
    }
}
