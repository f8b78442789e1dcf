use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod contact;
mod dataset;
mod error;
mod metrics;
mod models;
mod report;
mod search;
mod seed;
mod services;
mod wizard;

use contact::{ContactRequests, RequestOutcome};
use error::FlowError;
use models::{Coordinates, PostKind, Professional};
use services::{
    ConsoleToasts, FixedLocation, GeolocationProvider, LoggingContactRequester,
    StubPaymentGateway, UnavailableLocation,
};
use wizard::{
    CreateGroupFlow, DonationFlow, GroupDraft, Plan, RegistrationDetails, RegistrationFlow,
    RegistrationStep,
};

#[derive(Parser)]
#[command(name = "ummahlink")]
#[command(about = "Community directory, charity and group views for UmmahLink", long_about = None)]
struct Cli {
    /// JSON dataset to use instead of the built-in community snapshot
    #[arg(long, global = true, env = "UMMAHLINK_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the professional directory
    Professionals {
        #[arg(long, default_value = "")]
        query: String,
        /// Ask for the device position before listing
        #[arg(long)]
        near_me: bool,
        /// Position reported by the location provider, as "lat,lon"
        #[arg(long, env = "UMMAHLINK_POSITION", value_parser = parse_position)]
        position: Option<Coordinates>,
    },
    /// List charity campaigns with funding progress
    Causes {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Show notifications and the unread badge
    Notifications {
        #[arg(long)]
        mark_all_read: bool,
    },
    /// List groups, scholar Q&A first
    Groups {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Show the community feed
    Feed {
        #[arg(long, value_enum)]
        kind: Option<PostKind>,
    },
    /// List events
    Events {
        #[arg(long, default_value = "")]
        query: String,
        /// Only show events on or after this date
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Show today's prayer timetable
    Prayer {
        /// Time of day to compute the next prayer from, as HH:MM
        #[arg(long, value_parser = parse_time)]
        now: Option<NaiveTime>,
    },
    /// Show the current user's profile header
    Profile {
        /// Display this nickname instead of the full name
        #[arg(long)]
        nickname: Option<String>,
        /// Show only the first name in the public directory
        #[arg(long)]
        hide_full_name: bool,
    },
    /// Create a community group
    CreateGroup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "United Kingdom")]
        country: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        town: String,
        #[arg(long, default_value = "")]
        mosque: String,
    },
    /// Register as a community professional
    Register {
        #[arg(long, default_value = "")]
        profession: String,
        #[arg(long, default_value = "")]
        rate: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        mosque: String,
        /// Comma separated
        #[arg(long, default_value = "")]
        specialties: String,
        #[arg(long, default_value_t = 5)]
        radius: u8,
        #[arg(long, value_enum)]
        plan: Option<Plan>,
        /// Make the stub payment gateway decline with this reason
        #[arg(long)]
        decline: Option<String>,
    },
    /// Donate to a charity campaign
    Donate {
        #[arg(long)]
        cause: u32,
        /// One of the presets (10, 50, 100) or any other amount
        #[arg(long)]
        amount: String,
        /// Make the stub payment gateway decline with this reason
        #[arg(long)]
        decline: Option<String>,
    },
    /// Ask a professional to share their contact details
    RequestContact {
        #[arg(long)]
        id: u32,
        /// Press the button this many times
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
    /// Import professionals from a CSV file and search them
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Generate a markdown community digest
    Report {
        #[arg(long, default_value = "digest.md")]
        out: PathBuf,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn parse_position(value: &str) -> Result<Coordinates, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got {value:?}"))?;
    let latitude: f64 = lat.trim().parse().map_err(|_| format!("bad latitude {lat:?}"))?;
    let longitude: f64 = lon.trim().parse().map_err(|_| format!("bad longitude {lon:?}"))?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("position {value:?} is out of range"));
    }
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|err| format!("{value:?}: {err}"))
}

fn gateway(decline: Option<String>) -> StubPaymentGateway {
    match decline {
        Some(reason) => StubPaymentGateway::declining(reason),
        None => StubPaymentGateway::approving(),
    }
}

fn print_professionals(pros: &[&Professional], requests: &ContactRequests) {
    for pro in pros {
        println!(
            "- {} | {} | ★ {:.1} ({} reviews)",
            pro.name, pro.profession, pro.rating, pro.reviews
        );
        println!(
            "    {} · {} · radius {} · {}",
            pro.rate, pro.location, pro.radius, pro.mosque
        );
        if !pro.specialties.is_empty() {
            println!("    {}", pro.specialties.join(", "));
        }
        match contact::visible_contact(pro) {
            Some(details) => println!("    {} · {}", details.phone, details.email),
            None => println!("    [{}]", requests.button_label(pro)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let dataset = dataset::load(cli.data.as_deref()).with_context(|| match &cli.data {
        Some(path) => format!("failed to load dataset from {}", path.display()),
        None => "failed to build the seed dataset".to_string(),
    })?;

    match cli.command {
        Commands::Professionals {
            query,
            near_me,
            position,
        } => {
            if near_me {
                let located = match position {
                    Some(coords) => FixedLocation(coords).current_position().await,
                    None => {
                        UnavailableLocation("no position reported".to_string())
                            .current_position()
                            .await
                    }
                };
                match located {
                    Ok(coords) => println!("Your location: {coords} (directory order unchanged)"),
                    Err(err) => {
                        tracing::warn!(%err, "geolocation failed");
                        println!("{err}. {}", err.retry_hint());
                    }
                }
            }

            let matched = search::filter_records(&query, &dataset.professionals);
            if matched.is_empty() {
                println!("No professionals match {query:?}.");
                return Ok(());
            }
            print_professionals(&matched, &ContactRequests::new());
        }
        Commands::Causes { query } => {
            for cause in search::filter_records(&query, &dataset.causes) {
                let badge = if metrics::is_high_transparency(cause.transparency_score) {
                    "green"
                } else {
                    "amber"
                };
                println!(
                    "- {} [{}] by {} ({}, reg {})",
                    cause.title,
                    cause.category,
                    cause.organization,
                    cause.verification_status,
                    cause.registration_number
                );
                let score = if metrics::transparency_text_highlighted(cause.transparency_score) {
                    "good"
                } else {
                    "fair"
                };
                println!(
                    "    £{:.0} raised of £{:.0} ({:.0}%) · ★ {:.1} {badge} · transparency {}% ({score})",
                    cause.raised,
                    cause.target,
                    metrics::funding_percentage(cause.raised, cause.target),
                    cause.rating,
                    cause.transparency_score
                );
                if let Some(link) = &cause.project_link {
                    println!("    {link}");
                }
            }
        }
        Commands::Notifications { mark_all_read } => {
            let notifications = if mark_all_read {
                metrics::mark_all_read(&dataset.notifications)
            } else {
                dataset.notifications.clone()
            };
            println!("{} unread", metrics::unread_count(&notifications));
            for n in &notifications {
                let marker = if n.read { " " } else { "•" };
                println!("{marker} [{}] {}: {} ({})", n.kind, n.title, n.message, n.time);
            }
        }
        Commands::Groups { query } => {
            let matched: Vec<_> = search::filter_records(&query, &dataset.groups)
                .into_iter()
                .cloned()
                .collect();
            let partition = metrics::partition_groups(&matched);
            println!("Scholar Q&A:");
            for group in &partition.scholar_qa {
                let specialty = group.specialty.as_deref().unwrap_or("general");
                println!(
                    "- {} ({} members) · {specialty} · {}",
                    group.name, group.members, group.mosque
                );
            }
            println!("Groups:");
            for group in &partition.general {
                println!(
                    "- {} ({} members) · {} · {}",
                    group.name, group.members, group.location, group.mosque
                );
            }
        }
        Commands::Feed { kind } => {
            let posts = match kind {
                Some(kind) => metrics::posts_of_kind(&dataset.posts, kind),
                None => dataset.posts.iter().collect(),
            };
            for post in posts {
                println!(
                    "{} {} · {} · {:?}",
                    post.author.name, post.author.handle, post.time, post.kind
                );
                println!("    {}", post.content);
                println!("    ♥ {}  💬 {}", post.likes, post.comments);
            }
        }
        Commands::Events { query, from } => {
            let matched: Vec<_> = search::filter_records(&query, &dataset.events)
                .into_iter()
                .cloned()
                .collect();
            let events = match from {
                Some(date) => metrics::upcoming_events(&matched, date),
                None => matched.iter().collect(),
            };
            for event in events {
                println!(
                    "- {} on {} {} at {} [{}] {} · {} going",
                    event.title,
                    event.date,
                    event.time,
                    event.location,
                    event.category,
                    event.price,
                    event.attendees
                );
            }
        }
        Commands::Prayer { now } => {
            let now = now.unwrap_or_else(|| chrono::Local::now().time());
            let next = metrics::next_prayer(&dataset.prayer_times, now);
            for (name, time) in dataset.prayer_times.entries() {
                let marker = match next {
                    Some((next_name, _)) if next_name == name => "→",
                    _ => " ",
                };
                println!("{marker} {name:<8} {time}");
            }
            match next {
                Some((name, time)) => println!("Next prayer: {name} at {}", time.format("%H:%M")),
                None => bail!("prayer timetable has no valid times"),
            }
        }
        Commands::Profile {
            nickname,
            hide_full_name,
        } => {
            let mut privacy = dataset.privacy.clone();
            if nickname.is_some() || hide_full_name {
                let mut edited = privacy.clone();
                if let Some(nickname) = nickname {
                    edited.use_nickname = true;
                    edited.nickname = nickname;
                }
                if hide_full_name {
                    edited.show_full_name = false;
                }
                privacy = match wizard::save_privacy(edited, &ConsoleToasts) {
                    Ok(saved) => saved,
                    Err(err) => {
                        for field in err.fields() {
                            println!("  {field}");
                        }
                        bail!("profile not updated");
                    }
                };
            }
            let user = &dataset.current_user;
            let mode = if privacy.use_nickname { " (Private Mode)" } else { "" };
            println!("{}{mode}", user.display_name(&privacy));
            println!("{} · {}", user.handle, user.location);
            println!("{}", user.bio);
            if !user.interests.is_empty() {
                println!("Interests: {}", user.interests.join(", "));
            }
        }
        Commands::CreateGroup {
            name,
            description,
            country,
            city,
            town,
            mosque,
        } => {
            let draft = GroupDraft {
                name,
                description,
                country,
                city,
                town,
                mosque,
            };
            let toasts = ConsoleToasts;
            let mut flow = CreateGroupFlow::new(&toasts);
            flow.open();
            let next_id = dataset.groups.iter().map(|g| g.id).max().unwrap_or(0) + 1;
            match flow.submit(&draft, next_id) {
                Ok(group) => {
                    let mosque = if group.mosque.is_empty() {
                        "no affiliated mosque"
                    } else {
                        group.mosque.as_str()
                    };
                    println!(
                        "- {} ({}, {}) · {mosque} · awaiting approval",
                        group.name, group.location, draft.country
                    );
                }
                Err(err) => {
                    for field in err.fields() {
                        println!("  {field}");
                    }
                    bail!("group not created");
                }
            }
        }
        Commands::Register {
            profession,
            rate,
            city,
            mosque,
            specialties,
            radius,
            plan,
            decline,
        } => {
            let gateway = gateway(decline);
            let toasts = ConsoleToasts;
            let mut flow = RegistrationFlow::new(&gateway, &toasts);
            let details = RegistrationDetails {
                profession,
                rate,
                city,
                mosque,
                specialties,
                radius_miles: radius,
            };
            let tags = details.specialty_list();
            let base = if details.mosque.is_empty() {
                details.city.clone()
            } else {
                format!("{}, {}", details.mosque, details.city)
            };
            flow.open();
            flow.set_details(details);
            if let Some(plan) = plan {
                flow.select_plan(plan);
            }

            loop {
                let step = flow.wizard().step();
                match flow.next().await {
                    Ok(RegistrationStep::Moved(transition)) => {
                        tracing::debug!(?transition, "registration step");
                        println!("Step {step} of {} done.", flow.wizard().max_step());
                    }
                    Ok(RegistrationStep::Registered(receipt)) => {
                        println!(
                            "Registered near {base} with specialties [{}]; transaction {} for £{:.2}.",
                            tags.join(", "),
                            receipt.transaction_id,
                            receipt.amount
                        );
                        tracing::debug!(open = flow.wizard().is_open(), "registration finished");
                        break;
                    }
                    Err(FlowError::Validation(err)) => {
                        for field in err.fields() {
                            println!("  {field}");
                        }
                        if err.has_field("plan") {
                            println!("  plans: starter, professional, featured");
                        }
                        bail!("registration stopped at step {step}");
                    }
                    Err(FlowError::Service(err)) => {
                        bail!("registration payment failed: {err}");
                    }
                }
            }
        }
        Commands::Donate {
            cause,
            amount,
            decline,
        } => {
            let Some(target) = dataset.causes.iter().find(|c| c.id == cause) else {
                bail!("no charity campaign with id {cause}");
            };
            let mut donation = DonationFlow::new();
            match amount.parse::<u32>() {
                Ok(value) if wizard::DONATION_PRESETS.contains(&value) => {
                    donation.select_preset(value)
                }
                _ => donation.set_custom(amount),
            }
            let preset = wizard::DONATION_PRESETS
                .iter()
                .find(|value| donation.is_selected(**value));
            match preset {
                Some(value) => println!("Preset £{value} selected."),
                None => println!("Custom amount £{}.", donation.amount_text()),
            }

            let receipt = donation
                .pay(target, &gateway(decline), &ConsoleToasts)
                .await
                .context("donation failed")?;
            let after = metrics::funding_percentage(target.raised + receipt.amount, target.target);
            println!(
                "Transaction {}. {} would now be {:.0}% funded.",
                receipt.transaction_id, target.title, after
            );
        }
        Commands::RequestContact { id, repeat } => {
            let Some(pro) = dataset.professionals.iter().find(|p| p.id == id) else {
                bail!("no professional with id {id}");
            };
            let requester = LoggingContactRequester;
            let mut requests = ContactRequests::new();
            for _ in 0..repeat.max(1) {
                let outcome = requests
                    .request(pro, &requester)
                    .await
                    .with_context(|| format!("contact request for {} failed", pro.name))?;
                match outcome {
                    RequestOutcome::Sent => println!("Request sent to {}.", pro.name),
                    RequestOutcome::AlreadyRequested => {
                        println!("Already requested; waiting for {} to accept.", pro.name)
                    }
                    RequestOutcome::NotNeeded => {
                        println!("{} shares contact details publicly.", pro.name)
                    }
                }
            }
            if requests.is_empty() {
                println!("No requests pending.");
            } else if !requests.button_enabled(pro) {
                println!("{} pending request(s).", requests.len());
            }
            print_professionals(&[pro], &requests);
        }
        Commands::Import { csv, query } => {
            let imported = dataset::import_professionals(&csv)
                .with_context(|| format!("failed to import {}", csv.display()))?;
            let matched = search::filter_records(&query, &imported);
            println!(
                "Imported {} professionals from {}, {} match.",
                imported.len(),
                csv.display(),
                matched.len()
            );
            print_professionals(&matched, &ContactRequests::new());
        }
        Commands::Report { out, today } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let report = report::build_report(&dataset, today);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
