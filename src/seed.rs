use chrono::NaiveDate;

use crate::models::{
    Author, CharityCause, ContactDetails, Coordinates, Dataset, Event, Group, GroupKind,
    Location, Notification, Post, PostKind, PrayerTimes, PrivacySettings, Professional,
    UserProfile, VerificationStatus,
};

/// The built-in community snapshot used when no dataset file is given.
pub fn dataset() -> Dataset {
    Dataset {
        current_user: current_user(),
        privacy: PrivacySettings {
            use_nickname: false,
            nickname: "Ahmed_99".to_string(),
            show_full_name: true,
        },
        professionals: professionals(),
        causes: causes(),
        notifications: notifications(),
        groups: groups(),
        posts: posts(),
        events: events(),
        prayer_times: prayer_times(),
    }
}

pub fn current_user() -> UserProfile {
    UserProfile {
        name: "Ahmed Hassan".to_string(),
        handle: "@ahmed_h".to_string(),
        location: "London, UK".to_string(),
        bio: "Seeker of knowledge. Passionate about community service and youth mentorship."
            .to_string(),
        interests: vec![
            "Islamic History".to_string(),
            "Charity".to_string(),
            "Football".to_string(),
            "Calligraphy".to_string(),
        ],
    }
}

fn location(city: &str, town: &str, coordinates: Option<(f64, f64)>) -> Location {
    Location {
        city: city.to_string(),
        town: town.to_string(),
        coordinates: coordinates.map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        }),
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn professionals() -> Vec<Professional> {
    vec![
        Professional {
            id: 1,
            name: "Dr. Sarah Ahmed".to_string(),
            profession: "Pediatrician".to_string(),
            rate: "£120/hr".to_string(),
            location: location("London", "Wembley", Some((51.5560, -0.2795))),
            radius: "10 miles".to_string(),
            mosque: "Wembley Central Masjid".to_string(),
            rating: 4.9,
            reviews: 124,
            specialties: tags(&["Child Health", "Vaccinations"]),
            recent_work: "Ran a free vaccination clinic after Jumu'ah.".to_string(),
            contact_hidden: true,
            contact: ContactDetails {
                phone: "+44 20 7946 0101".to_string(),
                email: "sarah.ahmed@example.com".to_string(),
            },
        },
        Professional {
            id: 2,
            name: "Yusuf Khan".to_string(),
            profession: "Electrician".to_string(),
            rate: "£60/hr".to_string(),
            location: location("Birmingham", "Sparkhill", Some((52.4530, -1.8610))),
            radius: "15 miles".to_string(),
            mosque: "Sparkbrook Masjid".to_string(),
            rating: 4.8,
            reviews: 89,
            specialties: tags(&["Wiring", "Lighting", "Emergency Repairs"]),
            recent_work: "Rewired the community centre kitchen.".to_string(),
            contact_hidden: false,
            contact: ContactDetails {
                phone: "+44 121 496 0202".to_string(),
                email: "yusuf.khan@example.com".to_string(),
            },
        },
        Professional {
            id: 3,
            name: "Aisha Malik".to_string(),
            profession: "Math Tutor".to_string(),
            rate: "£35/hr".to_string(),
            location: location("London", "Ilford", None),
            radius: "5 miles".to_string(),
            mosque: "Ilford Islamic Centre".to_string(),
            rating: 5.0,
            reviews: 45,
            specialties: tags(&["GCSE", "A-Level", "Calculus"]),
            recent_work: "Weekend revision sessions for Year 11 students.".to_string(),
            contact_hidden: true,
            contact: ContactDetails {
                phone: "+44 20 7946 0303".to_string(),
                email: "aisha.malik@example.com".to_string(),
            },
        },
        Professional {
            id: 4,
            name: "Ibrahim Patel".to_string(),
            profession: "Legal Consultant".to_string(),
            rate: "£150/hr".to_string(),
            location: location("Manchester", "Cheetham Hill", Some((53.5000, -2.2380))),
            radius: "National (Remote)".to_string(),
            mosque: "North Manchester Jamia Mosque".to_string(),
            rating: 4.7,
            reviews: 210,
            specialties: tags(&["Property Law", "Islamic Wills", "Family Law"]),
            recent_work: "Drafted wills for twelve families at a masjid workshop.".to_string(),
            contact_hidden: false,
            contact: ContactDetails {
                phone: "+44 161 496 0404".to_string(),
                email: "ibrahim.patel@example.com".to_string(),
            },
        },
        Professional {
            id: 5,
            name: "Fatima Noor".to_string(),
            profession: "Plumber".to_string(),
            rate: "Fixed Price".to_string(),
            location: location("Leeds", "Harehills", None),
            radius: "20 miles".to_string(),
            mosque: "Leeds Grand Mosque".to_string(),
            rating: 3.6,
            reviews: 18,
            specialties: tags(&["Boilers", "Bathrooms"]),
            recent_work: "Replaced the wudu area taps at the masjid.".to_string(),
            contact_hidden: true,
            contact: ContactDetails {
                phone: "+44 113 496 0505".to_string(),
                email: "fatima.noor@example.com".to_string(),
            },
        },
    ]
}

pub fn causes() -> Vec<CharityCause> {
    vec![
        CharityCause {
            id: 1,
            title: "Emergency Water Wells".to_string(),
            organization: "Islamic Relief".to_string(),
            registration_number: "328158".to_string(),
            entity_name: "Islamic Relief Worldwide".to_string(),
            verification_status: VerificationStatus::Verified,
            rating: 4.8,
            transparency_score: 95,
            target: 12000.0,
            raised: 8450.0,
            category: "Water".to_string(),
            description: "Drilling deep wells for villages facing drought.".to_string(),
            project_link: Some("https://example.org/wells".to_string()),
        },
        CharityCause {
            id: 2,
            title: "Orphan Sponsorship Programme".to_string(),
            organization: "Muslim Hands".to_string(),
            registration_number: "1105056".to_string(),
            entity_name: "Muslim Hands UK".to_string(),
            verification_status: VerificationStatus::Verified,
            rating: 4.6,
            transparency_score: 90,
            target: 5000.0,
            raised: 3250.0,
            category: "Orphans".to_string(),
            description: "Education, food and healthcare for orphaned children.".to_string(),
            project_link: None,
        },
        CharityCause {
            id: 3,
            title: "Masjid Roof Repair".to_string(),
            organization: "Wembley Central Masjid Trust".to_string(),
            registration_number: "Pending".to_string(),
            entity_name: "Wembley Central Masjid Trust".to_string(),
            verification_status: VerificationStatus::Pending,
            rating: 4.2,
            transparency_score: 78,
            target: 15000.0,
            raised: 15600.0,
            category: "Masjid".to_string(),
            description: "Fixing the leaking prayer hall roof before winter.".to_string(),
            project_link: None,
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "New reply".to_string(),
            message: "Sarah Ahmed replied to your post.".to_string(),
            time: "5 min ago".to_string(),
            kind: "comment".to_string(),
            read: false,
        },
        Notification {
            id: 2,
            title: "Event reminder".to_string(),
            message: "Annual Community Iftar starts tomorrow at 17:30.".to_string(),
            time: "1 hour ago".to_string(),
            kind: "event".to_string(),
            read: false,
        },
        Notification {
            id: 3,
            title: "Donation received".to_string(),
            message: "Thank you for supporting Emergency Water Wells.".to_string(),
            time: "2 days ago".to_string(),
            kind: "charity".to_string(),
            read: true,
        },
    ]
}

pub fn groups() -> Vec<Group> {
    vec![
        Group {
            id: 1,
            name: "Fajr Warriors".to_string(),
            members: 1240,
            description: "Encouraging each other to wake up for Fajr prayer.".to_string(),
            icon: "star".to_string(),
            location: location("London", "Whitechapel", None),
            mosque: "East London Mosque".to_string(),
            kind: GroupKind::Community,
            specialty: None,
        },
        Group {
            id: 2,
            name: "Ask the Ulama: Fiqh of Finance".to_string(),
            members: 610,
            description: "Scholars answer questions on halal earning and debt.".to_string(),
            icon: "book-open".to_string(),
            location: location("Manchester", "Cheetham Hill", None),
            mosque: "North Manchester Jamia Mosque".to_string(),
            kind: GroupKind::ScholarQa,
            specialty: Some("Inheritance and Zakat".to_string()),
        },
        Group {
            id: 3,
            name: "Quran Study Circle".to_string(),
            members: 850,
            description: "Weekly Tadabbur and recitation correction.".to_string(),
            icon: "book-open".to_string(),
            location: location("London", "Wembley", None),
            mosque: "Wembley Central Masjid".to_string(),
            kind: GroupKind::Community,
            specialty: None,
        },
        Group {
            id: 4,
            name: "Sisters' Tafsir Q&A".to_string(),
            members: 330,
            description: "Open questions on tafsir, answered by qualified teachers.".to_string(),
            icon: "message-circle".to_string(),
            location: location("Birmingham", "Sparkhill", None),
            mosque: "Sparkbrook Masjid".to_string(),
            kind: GroupKind::ScholarQa,
            specialty: Some("Tafsir".to_string()),
        },
        Group {
            id: 5,
            name: "Local Charity Team".to_string(),
            members: 420,
            description: "Organizing local food drives and support.".to_string(),
            icon: "heart".to_string(),
            location: location("London", "Ilford", None),
            mosque: "Ilford Islamic Centre".to_string(),
            kind: GroupKind::Community,
            specialty: None,
        },
    ]
}

pub fn posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            author: Author {
                name: "Sarah Ahmed".to_string(),
                handle: "@sarah_design".to_string(),
            },
            content: "Just finished reading Surah Al-Kahf. Jumu'ah Mubarak everyone!".to_string(),
            time: "2 hours ago".to_string(),
            likes: 45,
            comments: 12,
            kind: PostKind::Update,
            image: None,
        },
        Post {
            id: 2,
            author: Author {
                name: "Community Admin".to_string(),
                handle: "@admin".to_string(),
            },
            content: "Reminder: the monthly food drive is this Saturday at 10 AM. We still need 5 volunteers for packaging!".to_string(),
            time: "5 hours ago".to_string(),
            likes: 89,
            comments: 24,
            kind: PostKind::Announcement,
            image: Some("/assets/community_center.png".to_string()),
        },
        Post {
            id: 3,
            author: Author {
                name: "Bilal O.".to_string(),
                handle: "@bilal_o".to_string(),
            },
            content: "Please keep my grandmother in your duas, she is undergoing surgery tomorrow.".to_string(),
            time: "1 day ago".to_string(),
            likes: 156,
            comments: 45,
            kind: PostKind::PrayerRequest,
            image: None,
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn events() -> Vec<Event> {
    vec![
        Event {
            id: 1,
            title: "Annual Community Iftar".to_string(),
            date: date(2025, 3, 15),
            time: "17:30 - 20:00".to_string(),
            location: "Central Park Pavilion".to_string(),
            attendees: 145,
            category: "Social".to_string(),
            price: "Free".to_string(),
            description: "Join us for our biggest community gathering of the year.".to_string(),
        },
        Event {
            id: 2,
            title: "Calligraphy Masterclass".to_string(),
            date: date(2025, 3, 18),
            time: "14:00 - 16:00".to_string(),
            location: "Art Center, Studio B".to_string(),
            attendees: 12,
            category: "Workshop".to_string(),
            price: "£25".to_string(),
            description: "Learn the basics of Thuluth script.".to_string(),
        },
        Event {
            id: 3,
            title: "Youth Soccer Tournament".to_string(),
            date: date(2025, 3, 20),
            time: "09:00 - 14:00".to_string(),
            location: "City Sports Complex".to_string(),
            attendees: 60,
            category: "Sports".to_string(),
            price: "£5/team".to_string(),
            description: "Annual 5-a-side tournament for ages 12-16.".to_string(),
        },
        Event {
            id: 4,
            title: "Fiqh of Finance Seminar".to_string(),
            date: date(2025, 3, 22),
            time: "18:30 - 20:30".to_string(),
            location: "East London Mosque Hall".to_string(),
            attendees: 85,
            category: "Education".to_string(),
            price: "Free".to_string(),
            description: "Understanding modern finance through an Islamic perspective.".to_string(),
        },
    ]
}

pub fn prayer_times() -> PrayerTimes {
    PrayerTimes {
        fajr: "05:12".to_string(),
        dhuhr: "12:30".to_string(),
        asr: "15:45".to_string(),
        maghrib: "18:12".to_string(),
        isha: "19:45".to_string(),
    }
}
