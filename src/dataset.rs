use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::DataError;
use crate::models::{CharityCause, ContactDetails, Dataset, Location, Professional};
use crate::seed;

/// Loads a JSON dataset, or the built-in seed when no path is given.
pub fn load(path: Option<&Path>) -> Result<Dataset, DataError> {
    let Some(path) = path else {
        tracing::debug!("using built-in seed dataset");
        return Ok(seed::dataset());
    };

    let raw = std::fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&raw)?;
    validate(&dataset)?;
    tracing::info!(
        path = %path.display(),
        professionals = dataset.professionals.len(),
        causes = dataset.causes.len(),
        groups = dataset.groups.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

pub const MAX_RATING: f64 = 5.0;
pub const MAX_TRANSPARENCY: u8 = 100;

fn check_range(
    record: &str,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), DataError> {
    // NaN fails `contains`.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DataError::OutOfRange {
            record: record.to_string(),
            field,
            value,
            min,
            max,
        })
    }
}

pub fn validate_professional(pro: &Professional) -> Result<(), DataError> {
    let record = format!("professional {}", pro.id);
    check_range(&record, "rating", pro.rating, 0.0, MAX_RATING)
}

pub fn validate_cause(cause: &CharityCause) -> Result<(), DataError> {
    let record = format!("cause {}", cause.id);
    check_range(&record, "rating", cause.rating, 0.0, MAX_RATING)?;
    check_range(
        &record,
        "transparency_score",
        f64::from(cause.transparency_score),
        0.0,
        f64::from(MAX_TRANSPARENCY),
    )?;
    check_range(&record, "target", cause.target, 0.0, f64::MAX)?;
    check_range(&record, "raised", cause.raised, 0.0, f64::MAX)
}

/// Rejects records whose numbers fall outside the ranges the views assume.
pub fn validate(dataset: &Dataset) -> Result<(), DataError> {
    for pro in &dataset.professionals {
        validate_professional(pro)?;
    }
    for cause in &dataset.causes {
        validate_cause(cause)?;
    }
    Ok(())
}

#[derive(Deserialize)]
struct CsvRow {
    id: u32,
    name: String,
    profession: String,
    rate: String,
    city: String,
    town: String,
    radius: String,
    mosque: String,
    rating: f64,
    reviews: u32,
    /// Semicolon separated.
    specialties: Option<String>,
    recent_work: Option<String>,
    contact_hidden: bool,
    phone: String,
    email: String,
}

impl TryFrom<CsvRow> for Professional {
    type Error = DataError;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let specialties = row
            .specialties
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        let pro = Professional {
            id: row.id,
            name: row.name,
            profession: row.profession,
            rate: row.rate,
            location: Location {
                city: row.city,
                town: row.town,
                coordinates: None,
            },
            radius: row.radius,
            mosque: row.mosque,
            rating: row.rating,
            reviews: row.reviews,
            specialties,
            recent_work: row.recent_work.unwrap_or_default(),
            contact_hidden: row.contact_hidden,
            contact: ContactDetails {
                phone: row.phone,
                email: row.email,
            },
        };
        validate_professional(&pro)?;
        Ok(pro)
    }
}

pub fn read_professionals<R: Read>(reader: R) -> Result<Vec<Professional>, DataError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut professionals = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        professionals.push(Professional::try_from(result?)?);
    }

    Ok(professionals)
}

pub fn import_professionals(csv_path: &Path) -> Result<Vec<Professional>, DataError> {
    let file = std::fs::File::open(csv_path)?;
    let professionals = read_professionals(file)?;
    tracing::info!(
        path = %csv_path.display(),
        count = professionals.len(),
        "imported professionals"
    );
    Ok(professionals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,name,profession,rate,city,town,radius,mosque,rating,reviews,specialties,recent_work,contact_hidden,phone,email
10,Hamza Ali,Dentist,£80/hr,Leicester,Highfields,8 miles,Masjid Umar,4.4,31,Check-ups; Braces ;,Free screening day,true,+44 116 000 0000,hamza@example.com
11,Maryam Yusuf,Architect,Fixed Price,Bradford,Manningham,National (Remote),Bradford Grand Mosque,5.0,7,,,false,+44 1274 000 000,maryam@example.com
";

    const HEADER: &str = "id,name,profession,rate,city,town,radius,mosque,rating,reviews,specialties,recent_work,contact_hidden,phone,email";

    fn row_with_rating(rating: &str) -> String {
        format!(
            "{HEADER}\n12,Omar Siddiqui,Accountant,£45/hr,London,Tooting,10 miles,Tooting Islamic Centre,{rating},58,,,true,+44 20 7946 0012,omar@example.com\n"
        )
    }

    #[test]
    fn csv_rows_become_professionals() {
        let pros = read_professionals(SAMPLE.as_bytes()).expect("parse");
        assert_eq!(pros.len(), 2);

        assert_eq!(pros[0].specialties, vec!["Check-ups", "Braces"]);
        assert!(pros[0].contact_hidden);
        assert_eq!(pros[0].location.to_string(), "Highfields, Leicester");

        assert!(pros[1].specialties.is_empty());
        assert_eq!(pros[1].recent_work, "");
        assert_eq!(pros[1].rating, 5.0);
    }

    #[test]
    fn nan_rating_is_rejected_on_import() {
        let csv = row_with_rating("NaN");
        match read_professionals(csv.as_bytes()) {
            Err(DataError::OutOfRange { field, record, .. }) => {
                assert_eq!(field, "rating");
                assert_eq!(record, "professional 12");
            }
            other => panic!("expected out-of-range rating, got {other:?}"),
        }
    }

    #[test]
    fn ratings_above_five_are_rejected_not_clamped() {
        let csv = row_with_rating("6.2");
        assert!(matches!(
            read_professionals(csv.as_bytes()),
            Err(DataError::OutOfRange { .. })
        ));
        let pros = read_professionals(row_with_rating("4.5").as_bytes()).expect("parse");
        assert_eq!(pros[0].rating, 4.5);
    }

    #[test]
    fn json_dataset_ranges_are_checked() {
        assert!(validate(&seed::dataset()).is_ok());

        let mut dataset = seed::dataset();
        dataset.professionals[0].rating = 7.5;
        assert!(matches!(
            validate(&dataset),
            Err(DataError::OutOfRange { field: "rating", .. })
        ));

        let mut dataset = seed::dataset();
        dataset.causes[1].transparency_score = 180;
        assert!(matches!(
            validate(&dataset),
            Err(DataError::OutOfRange { field: "transparency_score", .. })
        ));

        let mut dataset = seed::dataset();
        dataset.causes[0].raised = f64::NAN;
        assert!(validate(&dataset).is_err());
    }

    #[test]
    fn load_rejects_out_of_range_json() {
        let mut dataset = seed::dataset();
        dataset.causes[0].rating = 9.0;
        let path = std::env::temp_dir().join(format!("ummahlink-{}.json", uuid::Uuid::new_v4()));
        let json = serde_json::to_string(&dataset).expect("serialize");
        std::fs::write(&path, json).expect("write");

        let result = load(Some(&path));
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(DataError::OutOfRange { field: "rating", .. })));
    }

    #[test]
    fn malformed_rows_are_errors() {
        let bad = "id,name\nnot-a-number,Someone\n";
        assert!(matches!(read_professionals(bad.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn seed_dataset_round_trips_through_json() {
        let json = serde_json::to_string(&seed::dataset()).expect("serialize");
        let parsed: Dataset = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.professionals, seed::professionals());
        assert_eq!(parsed.groups, seed::groups());
    }

    #[test]
    fn ulama_alias_is_accepted() {
        let group: crate::models::Group = serde_json::from_str(
            r#"{"id":9,"name":"Ask a Mufti","members":12,"description":"","icon":"book",
                "location":{"city":"London","town":"Tooting"},"mosque":"Tooting Islamic Centre",
                "kind":"ulama_qa","specialty":"Fiqh"}"#,
        )
        .expect("parse");
        assert_eq!(group.kind, crate::models::GroupKind::ScholarQa);
    }
}
