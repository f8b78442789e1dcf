use std::fmt;

use serde::Serialize;

use crate::error::{FieldError, FlowError, ServiceError, ValidationError};
use crate::models::{CharityCause, Group, GroupKind, Location, PrivacySettings};
use crate::services::{PaymentGateway, PaymentReceipt, PaymentRequest, ToastSink};

/// Linear 1-based step counter behind a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    step: u8,
    max_step: u8,
    open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTransition {
    Advanced(u8),
    /// Next on the last step. The wizard is back at step 1, closed.
    Completed,
    Retreated(u8),
    /// Back on the first step. The wizard is closed.
    Cancelled,
}

impl Wizard {
    pub fn new(max_step: u8) -> Self {
        Self {
            step: 1,
            max_step: max_step.max(1),
            open: false,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn max_step(&self) -> u8 {
        self.max_step
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.max_step
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn next(&mut self) -> WizardTransition {
        let transition = if self.step < self.max_step {
            self.step += 1;
            WizardTransition::Advanced(self.step)
        } else {
            self.reset();
            WizardTransition::Completed
        };
        tracing::debug!(?transition, "wizard next");
        transition
    }

    pub fn back(&mut self) -> WizardTransition {
        let transition = if self.step > 1 {
            self.step -= 1;
            WizardTransition::Retreated(self.step)
        } else {
            self.reset();
            WizardTransition::Cancelled
        };
        tracing::debug!(?transition, "wizard back");
        transition
    }

    fn reset(&mut self) {
        self.step = 1;
        self.open = false;
    }
}

pub const REGISTRATION_STEPS: u8 = 3;
pub const MAX_SERVICE_RADIUS_MILES: u8 = 50;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrationDetails {
    pub profession: String,
    pub rate: String,
    pub city: String,
    pub mosque: String,
    /// Comma separated, as typed.
    pub specialties: String,
    pub radius_miles: u8,
}

impl RegistrationDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.profession.trim().is_empty() {
            errors.push(FieldError::new("profession", "profession is required"));
        }
        if self.rate.trim().is_empty() {
            errors.push(FieldError::new("rate", "rate is required"));
        }
        if self.city.trim().is_empty() {
            errors.push(FieldError::new("city", "base city is required"));
        }
        if self.radius_miles > MAX_SERVICE_RADIUS_MILES {
            errors.push(FieldError::new(
                "radius",
                format!("service radius cannot exceed {MAX_SERVICE_RADIUS_MILES} miles"),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(errors))
        }
    }

    pub fn specialty_list(&self) -> Vec<String> {
        self.specialties
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Starter,
    Professional,
    Featured,
}

impl Plan {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Featured => "featured",
        }
    }

    /// Monthly price in pounds.
    pub fn monthly_price(&self) -> f64 {
        match self {
            Self::Starter => 4.99,
            Self::Professional => 9.99,
            Self::Featured => 19.99,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (£{:.2}/month)", self.id(), self.monthly_price())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationStep {
    Moved(WizardTransition),
    Registered(PaymentReceipt),
}

/// Professional registration: details, plan selection, payment.
pub struct RegistrationFlow<'a, P, T> {
    wizard: Wizard,
    details: RegistrationDetails,
    plan: Option<Plan>,
    gateway: &'a P,
    toasts: &'a T,
}

impl<'a, P: PaymentGateway, T: ToastSink> RegistrationFlow<'a, P, T> {
    pub fn new(gateway: &'a P, toasts: &'a T) -> Self {
        Self {
            wizard: Wizard::new(REGISTRATION_STEPS),
            details: RegistrationDetails::default(),
            plan: None,
            gateway,
            toasts,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn open(&mut self) {
        self.wizard.open();
    }

    pub fn set_details(&mut self, details: RegistrationDetails) {
        self.details = details;
    }

    pub fn select_plan(&mut self, plan: Plan) {
        self.plan = Some(plan);
    }

    pub async fn next(&mut self) -> Result<RegistrationStep, FlowError> {
        match self.wizard.step() {
            1 => self.details.validate()?,
            2 => {
                if self.plan.is_none() {
                    return Err(ValidationError(vec![FieldError::new(
                        "plan",
                        "choose a plan to continue",
                    )])
                    .into());
                }
            }
            _ => {}
        }

        if !self.wizard.is_last_step() {
            return Ok(RegistrationStep::Moved(self.wizard.next()));
        }

        let plan = self.plan.ok_or_else(|| {
            ValidationError(vec![FieldError::new("plan", "choose a plan to continue")])
        })?;
        let request = PaymentRequest {
            reference: format!("plan:{}", plan.id()),
            amount: plan.monthly_price(),
        };

        match self.gateway.charge(&request).await {
            Ok(receipt) => {
                self.toasts.show(
                    "Profile Submitted",
                    "Your professional profile is under review.",
                );
                self.wizard.next();
                self.clear();
                Ok(RegistrationStep::Registered(receipt))
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err.into())
            }
        }
    }

    pub fn back(&mut self) -> WizardTransition {
        let transition = self.wizard.back();
        if transition == WizardTransition::Cancelled {
            self.clear();
        }
        transition
    }

    fn clear(&mut self) {
        self.details = RegistrationDetails::default();
        self.plan = None;
    }

    fn report_failure(&self, err: &ServiceError) {
        self.toasts
            .show("Payment Failed", &format!("{err}. {}", err.retry_hint()));
    }
}

pub const DONATION_PRESETS: [u32; 3] = [10, 50, 100];

/// Amount picker behind the "Donate Now" modal. The amount is held as the
/// text the user typed or the preset they tapped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationFlow {
    amount: String,
}

impl DonationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount_text(&self) -> &str {
        &self.amount
    }

    pub fn select_preset(&mut self, value: u32) {
        self.amount = value.to_string();
    }

    pub fn set_custom(&mut self, text: impl Into<String>) {
        self.amount = text.into();
    }

    pub fn is_selected(&self, preset: u32) -> bool {
        self.amount == preset.to_string()
    }

    pub fn amount(&self) -> Result<f64, ValidationError> {
        let text = self.amount.trim();
        if text.is_empty() {
            return Err(ValidationError(vec![FieldError::new(
                "amount",
                "choose or enter an amount",
            )]));
        }

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            Ok(_) => Err(ValidationError(vec![FieldError::new(
                "amount",
                "amount must be greater than zero",
            )])),
            Err(_) => Err(ValidationError(vec![FieldError::new(
                "amount",
                format!("{text:?} is not a number"),
            )])),
        }
    }

    /// Either a receipt or an error; the amount is kept on failure so the
    /// user can retry.
    pub async fn pay<P: PaymentGateway, T: ToastSink>(
        &mut self,
        cause: &CharityCause,
        gateway: &P,
        toasts: &T,
    ) -> Result<PaymentReceipt, FlowError> {
        let amount = self.amount()?;
        let request = PaymentRequest {
            reference: format!("cause:{}", cause.id),
            amount,
        };

        match gateway.charge(&request).await {
            Ok(receipt) => {
                toasts.show(
                    "Donation Received",
                    &format!("£{amount:.2} to {}. Jazakallah khair.", cause.title),
                );
                self.amount.clear();
                Ok(receipt)
            }
            Err(err) => {
                toasts.show("Payment Failed", &format!("{err}. {}", err.retry_hint()));
                Err(err.into())
            }
        }
    }
}

/// The "Create Group" form. Country, description and mosque are optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub country: String,
    pub city: String,
    pub town: String,
    pub mosque: String,
}

impl GroupDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "group name is required"));
        }
        if self.city.trim().is_empty() {
            errors.push(FieldError::new("city", "city is required"));
        }
        if self.town.trim().is_empty() {
            errors.push(FieldError::new("town", "town or borough is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(errors))
        }
    }
}

/// Single-step modal: submit either closes it with a new group or keeps it
/// open with field errors.
pub struct CreateGroupFlow<'a, T> {
    wizard: Wizard,
    toasts: &'a T,
}

impl<'a, T: ToastSink> CreateGroupFlow<'a, T> {
    pub fn new(toasts: &'a T) -> Self {
        Self {
            wizard: Wizard::new(1),
            toasts,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn open(&mut self) {
        self.wizard.open();
    }

    pub fn cancel(&mut self) -> WizardTransition {
        self.wizard.back()
    }

    pub fn submit(&mut self, draft: &GroupDraft, id: u32) -> Result<Group, ValidationError> {
        draft.validate()?;

        let group = Group {
            id,
            name: draft.name.trim().to_string(),
            members: 1,
            description: draft.description.trim().to_string(),
            icon: "users".to_string(),
            location: Location {
                city: draft.city.trim().to_string(),
                town: draft.town.trim().to_string(),
                coordinates: None,
            },
            mosque: draft.mosque.trim().to_string(),
            kind: GroupKind::Community,
            specialty: None,
        };

        self.toasts.show(
            "Group Created Successfully",
            "Your new group has been created and is pending approval.",
        );
        self.wizard.next();
        tracing::info!(group = %group.name, id, "group submitted for approval");
        Ok(group)
    }
}

/// Applies edited privacy settings. A nickname is required when it is used.
pub fn save_privacy<T: ToastSink>(
    settings: PrivacySettings,
    toasts: &T,
) -> Result<PrivacySettings, ValidationError> {
    if settings.use_nickname && settings.nickname.trim().is_empty() {
        return Err(ValidationError(vec![FieldError::new(
            "nickname",
            "enter a nickname or turn it off",
        )]));
    }

    toasts.show("Profile Updated", "Your privacy settings have been saved.");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::services::testing::RecordingToasts;
    use crate::services::StubPaymentGateway;

    fn valid_details() -> RegistrationDetails {
        RegistrationDetails {
            profession: "Plumber".to_string(),
            rate: "£50/hr".to_string(),
            city: "London".to_string(),
            mosque: "East London Mosque".to_string(),
            specialties: "Boilers, , Emergency repairs".to_string(),
            radius_miles: 5,
        }
    }

    #[test]
    fn next_walks_to_completion_not_step_four() {
        let mut wizard = Wizard::new(3);
        wizard.open();
        assert_eq!(wizard.next(), WizardTransition::Advanced(2));
        assert_eq!(wizard.next(), WizardTransition::Advanced(3));
        assert_eq!(wizard.next(), WizardTransition::Completed);
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.is_open());
    }

    #[test]
    fn back_on_first_step_cancels() {
        let mut wizard = Wizard::new(3);
        wizard.open();
        wizard.next();
        assert_eq!(wizard.back(), WizardTransition::Retreated(1));
        assert_eq!(wizard.back(), WizardTransition::Cancelled);
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.is_open());
    }

    #[test]
    fn details_report_every_missing_field() {
        let details = RegistrationDetails {
            radius_miles: 80,
            ..RegistrationDetails::default()
        };
        let err = details.validate().unwrap_err();
        assert!(err.has_field("profession"));
        assert!(err.has_field("rate"));
        assert!(err.has_field("city"));
        assert!(err.has_field("radius"));
        assert!(!err.has_field("mosque"));
    }

    #[test]
    fn specialties_split_on_commas() {
        assert_eq!(
            valid_details().specialty_list(),
            vec!["Boilers".to_string(), "Emergency repairs".to_string()]
        );
    }

    #[tokio::test]
    async fn registration_completes_and_resets() {
        let gateway = StubPaymentGateway::approving();
        let toasts = RecordingToasts::default();
        let mut flow = RegistrationFlow::new(&gateway, &toasts);
        flow.open();

        let err = flow.next().await.unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(flow.wizard().step(), 1);

        flow.set_details(valid_details());
        assert_eq!(
            flow.next().await.expect("details"),
            RegistrationStep::Moved(WizardTransition::Advanced(2))
        );
        assert!(flow.next().await.is_err());

        flow.select_plan(Plan::Professional);
        flow.next().await.expect("plan");
        assert_eq!(flow.wizard().step(), 3);

        match flow.next().await.expect("payment") {
            RegistrationStep::Registered(receipt) => {
                assert_eq!(receipt.reference, "plan:professional");
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(flow.wizard().step(), 1);
        assert!(!flow.wizard().is_open());
        assert_eq!(toasts.titles(), vec!["Profile Submitted".to_string()]);

        flow.open();
        assert!(flow.next().await.is_err(), "details must not survive a completed run");
    }

    #[tokio::test]
    async fn registration_back_out_clears_the_form() {
        let gateway = StubPaymentGateway::approving();
        let toasts = RecordingToasts::default();
        let mut flow = RegistrationFlow::new(&gateway, &toasts);
        flow.open();
        flow.set_details(valid_details());
        flow.next().await.expect("details");

        assert_eq!(flow.back(), WizardTransition::Retreated(1));
        assert_eq!(flow.back(), WizardTransition::Cancelled);
        assert!(!flow.wizard().is_open());

        flow.open();
        assert!(matches!(flow.next().await, Err(FlowError::Validation(_))));
    }

    #[tokio::test]
    async fn declined_payment_stays_on_last_step() {
        let gateway = StubPaymentGateway::declining("insufficient funds");
        let toasts = RecordingToasts::default();
        let mut flow = RegistrationFlow::new(&gateway, &toasts);
        flow.open();
        flow.set_details(valid_details());
        flow.select_plan(Plan::Starter);
        flow.next().await.expect("details");
        flow.next().await.expect("plan");

        let err = flow.next().await.unwrap_err();
        assert!(matches!(err, FlowError::Service(ServiceError::PaymentDeclined(_))));
        assert_eq!(flow.wizard().step(), 3);
        assert!(flow.wizard().is_open());
        assert_eq!(toasts.titles(), vec!["Payment Failed".to_string()]);
    }

    #[test]
    fn donation_presets_are_selected_by_text() {
        let mut donation = DonationFlow::new();
        donation.select_preset(50);
        assert!(donation.is_selected(50));
        assert!(!donation.is_selected(10));

        donation.set_custom("50");
        assert!(donation.is_selected(50));
        donation.set_custom("50.0");
        assert!(!donation.is_selected(50));
        assert_eq!(donation.amount().expect("amount"), 50.0);
    }

    #[test]
    fn donation_rejects_bad_amounts() {
        let mut donation = DonationFlow::new();
        assert!(donation.amount().unwrap_err().has_field("amount"));
        donation.set_custom("abc");
        assert!(donation.amount().is_err());
        donation.set_custom("-5");
        assert!(donation.amount().is_err());
    }

    #[tokio::test]
    async fn donation_outcomes() {
        let cause = &seed::causes()[0];
        let toasts = RecordingToasts::default();
        let mut donation = DonationFlow::new();
        donation.select_preset(100);

        let err = donation
            .pay(cause, &StubPaymentGateway::declining("card expired"), &toasts)
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Service(_)));
        assert_eq!(donation.amount_text(), "100");

        let receipt = donation
            .pay(cause, &StubPaymentGateway::approving(), &toasts)
            .await
            .expect("donated");
        assert_eq!(receipt.amount, 100.0);
        assert_eq!(receipt.reference, "cause:1");
        assert_eq!(donation.amount_text(), "");
        assert_eq!(
            toasts.titles(),
            vec!["Payment Failed".to_string(), "Donation Received".to_string()]
        );
    }

    #[test]
    fn group_draft_requires_name_city_and_town() {
        let err = GroupDraft {
            name: "  ".to_string(),
            mosque: "East London Mosque".to_string(),
            ..GroupDraft::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("city"));
        assert!(err.has_field("town"));
        assert!(!err.has_field("mosque"));
        assert!(!err.has_field("country"));
    }

    #[test]
    fn create_group_toasts_and_closes() {
        let toasts = RecordingToasts::default();
        let mut flow = CreateGroupFlow::new(&toasts);
        flow.open();

        let invalid = GroupDraft::default();
        assert!(flow.submit(&invalid, 6).is_err());
        assert!(flow.wizard().is_open());
        assert!(toasts.titles().is_empty());

        let draft = GroupDraft {
            name: "Sunrise Runners".to_string(),
            description: "Morning runs after Fajr.".to_string(),
            country: "United Kingdom".to_string(),
            city: "London".to_string(),
            town: "Whitechapel".to_string(),
            mosque: String::new(),
        };
        let group = flow.submit(&draft, 6).expect("created");
        assert_eq!(group.id, 6);
        assert_eq!(group.kind, GroupKind::Community);
        assert_eq!(group.location.to_string(), "Whitechapel, London");
        assert!(!flow.wizard().is_open());
        assert_eq!(toasts.titles(), vec!["Group Created Successfully".to_string()]);
    }

    #[test]
    fn cancelling_group_form_closes_it() {
        let toasts = RecordingToasts::default();
        let mut flow = CreateGroupFlow::new(&toasts);
        flow.open();
        assert_eq!(flow.cancel(), WizardTransition::Cancelled);
        assert!(!flow.wizard().is_open());
        assert!(toasts.titles().is_empty());
    }

    #[test]
    fn saving_privacy_settings_toasts() {
        let toasts = RecordingToasts::default();
        let settings = PrivacySettings {
            use_nickname: true,
            nickname: "Ahmed_99".to_string(),
            show_full_name: false,
        };
        let saved = save_privacy(settings.clone(), &toasts).expect("saved");
        assert_eq!(saved, settings);
        assert_eq!(toasts.titles(), vec!["Profile Updated".to_string()]);

        let blank = PrivacySettings {
            nickname: " ".to_string(),
            ..settings
        };
        assert!(save_privacy(blank, &toasts).unwrap_err().has_field("nickname"));
        assert_eq!(toasts.titles().len(), 1);
    }
}
