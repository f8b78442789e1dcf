use chrono::{NaiveDate, NaiveTime};

use crate::models::{
    Event, Group, GroupKind, Notification, Post, PostKind, PrayerTimes, Professional,
};

/// Transparency scores above this get the green badge.
pub const HIGH_TRANSPARENCY_THRESHOLD: u8 = 90;

/// Share of the target raised so far. Not clamped: an over-funded cause
/// reports more than 100.
pub fn funding_percentage(raised: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    raised / target * 100.0
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Returns a copy of the list with every notification marked read.
pub fn mark_all_read(notifications: &[Notification]) -> Vec<Notification> {
    notifications
        .iter()
        .map(|n| Notification {
            read: true,
            ..n.clone()
        })
        .collect()
}

/// Badge tier. The boundary itself is not high.
pub fn is_high_transparency(score: u8) -> bool {
    score > HIGH_TRANSPARENCY_THRESHOLD
}

/// Colour of the "N% Score" text, which uses an inclusive boundary unlike the badge.
pub fn transparency_text_highlighted(score: u8) -> bool {
    score >= HIGH_TRANSPARENCY_THRESHOLD
}

#[derive(Debug, Clone, Default)]
pub struct GroupPartition<'a> {
    pub scholar_qa: Vec<&'a Group>,
    pub general: Vec<&'a Group>,
}

pub fn partition_groups(groups: &[Group]) -> GroupPartition<'_> {
    let (scholar_qa, general): (Vec<&Group>, Vec<&Group>) = groups
        .iter()
        .partition(|group| group.kind == GroupKind::ScholarQa);
    GroupPartition {
        scholar_qa,
        general,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub total_reviews: u64,
    /// Index 0 counts one-star ratings, index 4 five-star ratings.
    pub buckets: [usize; 5],
}

/// NaN lands in the one-star bucket.
pub fn rating_bucket(rating: f64) -> usize {
    if rating.is_nan() {
        return 0;
    }
    let stars = rating.floor().clamp(1.0, 5.0) as usize;
    stars.saturating_sub(1)
}

pub fn rating_summary(professionals: &[Professional]) -> Option<RatingSummary> {
    if professionals.is_empty() {
        return None;
    }

    let mut buckets = [0usize; 5];
    let mut total_rating = 0.0;
    let mut total_reviews = 0u64;

    for pro in professionals {
        buckets[rating_bucket(pro.rating)] += 1;
        total_rating += pro.rating;
        total_reviews += u64::from(pro.reviews);
    }

    Some(RatingSummary {
        average: total_rating / professionals.len() as f64,
        total_reviews,
        buckets,
    })
}

pub fn posts_of_kind(posts: &[Post], kind: PostKind) -> Vec<&Post> {
    posts.iter().filter(|post| post.kind == kind).collect()
}

/// Events on or after `today`, soonest first. Same-day events keep their order.
pub fn upcoming_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|event| event.date >= today).collect();
    upcoming.sort_by_key(|event| event.date);
    upcoming
}

/// The first prayer starting strictly after `now`, wrapping to the first
/// entry once the day's last prayer has begun. Unparseable times are skipped.
pub fn next_prayer(times: &PrayerTimes, now: NaiveTime) -> Option<(&'static str, NaiveTime)> {
    let parsed: Vec<(&'static str, NaiveTime)> = times
        .entries()
        .into_iter()
        .filter_map(|(name, value)| match NaiveTime::parse_from_str(value, "%H:%M") {
            Ok(time) => Some((name, time)),
            Err(err) => {
                tracing::warn!(prayer = name, value, %err, "skipping unparseable prayer time");
                None
            }
        })
        .collect();

    parsed
        .iter()
        .find(|(_, time)| *time > now)
        .or_else(|| parsed.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn notification(id: u32, read: bool) -> Notification {
        Notification {
            id,
            title: "Reminder".to_string(),
            message: "Halaqa tonight".to_string(),
            time: "1 hour ago".to_string(),
            kind: "event".to_string(),
            read,
        }
    }

    #[test]
    fn funding_percentage_matches_expected_values() {
        assert_eq!(funding_percentage(3250.0, 5000.0), 65.0);
        let wells = funding_percentage(8450.0, 12000.0);
        assert!((wells - 70.4166).abs() < 0.001);
    }

    #[test]
    fn funding_percentage_is_not_clamped() {
        let pct = funding_percentage(15600.0, 15000.0);
        assert!((pct - 104.0).abs() < 0.001);
        assert_eq!(funding_percentage(100.0, 0.0), 0.0);
    }

    #[test]
    fn unread_count_drops_to_zero_after_mark_all_read() {
        let list = vec![notification(1, false), notification(2, false), notification(3, true)];
        assert_eq!(unread_count(&list), 2);

        let updated = mark_all_read(&list);
        assert_eq!(unread_count(&updated), 0);
        assert_eq!(unread_count(&list), 2);
        assert_eq!(updated.len(), 3);
    }

    #[test]
    fn transparency_tiers_follow_boundaries() {
        assert!(!is_high_transparency(90));
        assert!(is_high_transparency(91));
        assert!(transparency_text_highlighted(90));
        assert!(!transparency_text_highlighted(89));
    }

    #[test]
    fn partition_preserves_relative_order() {
        let groups = seed::groups();
        let partition = partition_groups(&groups);
        let scholar: Vec<u32> = partition.scholar_qa.iter().map(|g| g.id).collect();
        let general: Vec<u32> = partition.general.iter().map(|g| g.id).collect();
        assert_eq!(scholar, vec![2, 4]);
        assert_eq!(general, vec![1, 3, 5]);
    }

    #[test]
    fn rating_summary_buckets_by_whole_stars() {
        let pros = seed::professionals();
        let summary = rating_summary(&pros).expect("summary");
        assert_eq!(summary.buckets, [0, 0, 1, 3, 1]);
        assert_eq!(summary.total_reviews, 124 + 89 + 45 + 210 + 18);
        assert!((summary.average - 4.6).abs() < 0.001);
        assert!(rating_summary(&[]).is_none());
        assert_eq!(rating_bucket(0.0), 0);
    }

    #[test]
    fn rating_bucket_is_total() {
        assert_eq!(rating_bucket(f64::NAN), 0);
        assert_eq!(rating_bucket(f64::INFINITY), 4);
        assert_eq!(rating_bucket(f64::NEG_INFINITY), 0);
        assert_eq!(rating_bucket(-3.0), 0);
    }

    #[test]
    fn upcoming_events_skip_past_dates() {
        let events = seed::events();
        let today = NaiveDate::from_ymd_opt(2025, 3, 18).expect("date");
        let titles: Vec<&str> = upcoming_events(&events, today)
            .iter()
            .map(|event| event.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Calligraphy Masterclass", "Youth Soccer Tournament", "Fiqh of Finance Seminar"]
        );
    }

    #[test]
    fn next_prayer_wraps_after_isha() {
        let times = seed::prayer_times();
        let afternoon = NaiveTime::from_hms_opt(14, 0, 0).expect("time");
        assert_eq!(next_prayer(&times, afternoon).map(|(name, _)| name), Some("asr"));

        let late = NaiveTime::from_hms_opt(22, 0, 0).expect("time");
        assert_eq!(next_prayer(&times, late).map(|(name, _)| name), Some("fajr"));
    }

    #[test]
    fn posts_filter_by_kind() {
        let posts = seed::posts();
        let requests = posts_of_kind(&posts, PostKind::PrayerRequest);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].author.handle, "@bilal_o");
    }
}
