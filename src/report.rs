use std::fmt::Write;

use chrono::NaiveDate;

use crate::metrics;
use crate::models::Dataset;

/// Markdown digest of the community dataset.
pub fn build_report(dataset: &Dataset, today: NaiveDate) -> String {
    let mut output = String::new();
    let user = &dataset.current_user;

    let _ = writeln!(output, "# UmmahLink Community Digest");
    let _ = writeln!(
        output,
        "Prepared for {} on {}",
        user.display_name(&dataset.privacy),
        today
    );
    let _ = writeln!(
        output,
        "{} unread notifications",
        metrics::unread_count(&dataset.notifications)
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Active Campaigns");

    if dataset.causes.is_empty() {
        let _ = writeln!(output, "No active campaigns.");
    } else {
        for cause in dataset.causes.iter() {
            let tier = if metrics::is_high_transparency(cause.transparency_score) {
                "high transparency"
            } else {
                "standard transparency"
            };
            let _ = writeln!(
                output,
                "- {} ({}, {}): £{:.0} of £{:.0} raised ({:.0}%), {} at {}%",
                cause.title,
                cause.organization,
                cause.verification_status,
                cause.raised,
                cause.target,
                metrics::funding_percentage(cause.raised, cause.target),
                tier,
                cause.transparency_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Groups");
    let partition = metrics::partition_groups(&dataset.groups);
    for (heading, groups) in [
        ("Scholar Q&A", &partition.scholar_qa),
        ("General", &partition.general),
    ] {
        let _ = writeln!(output, "### {heading}");
        if groups.is_empty() {
            let _ = writeln!(output, "None yet.");
        }
        for group in groups.iter() {
            let _ = writeln!(output, "- {} ({} members)", group.name, group.members);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Professionals");
    match metrics::rating_summary(&dataset.professionals) {
        None => {
            let _ = writeln!(output, "No professionals listed.");
        }
        Some(summary) => {
            let _ = writeln!(
                output,
                "{} listed, average rating {:.1} across {} reviews",
                dataset.professionals.len(),
                summary.average,
                summary.total_reviews
            );
            for (index, count) in summary.buckets.iter().enumerate().rev() {
                let _ = writeln!(output, "- {} star: {}", index + 1, count);
            }
        }
    }

    let upcoming = metrics::upcoming_events(&dataset.events, today);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Upcoming Events");

    if upcoming.is_empty() {
        let _ = writeln!(output, "No upcoming events.");
    } else {
        for event in upcoming.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} on {} at {} ({})",
                event.title, event.date, event.location, event.price
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn report_covers_every_section() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 19).expect("date");
        let report = build_report(&seed::dataset(), today);

        assert!(report.starts_with("# UmmahLink Community Digest"));
        assert!(report.contains("Prepared for Ahmed Hassan on 2025-03-19"));
        assert!(report.contains("2 unread notifications"));
        assert!(report.contains("Masjid Roof Repair"));
        assert!(report.contains("(104%)"));
        assert!(report.contains("- Ask the Ulama: Fiqh of Finance (610 members)"));
        assert!(report.contains("average rating 4.6 across 486 reviews"));
        assert!(!report.contains("Calligraphy Masterclass"));
        assert!(report.contains("Youth Soccer Tournament"));
    }

    #[test]
    fn empty_dataset_still_renders() {
        let mut dataset = seed::dataset();
        dataset.causes.clear();
        dataset.groups.clear();
        dataset.professionals.clear();
        dataset.events.clear();
        let report = build_report(&dataset, NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"));
        assert!(report.contains("No active campaigns."));
        assert!(report.contains("None yet."));
        assert!(report.contains("No professionals listed."));
        assert!(report.contains("No upcoming events."));
    }
}
