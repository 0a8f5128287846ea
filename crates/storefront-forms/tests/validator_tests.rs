// End-to-end tests for FormValidator over an in-memory page

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::rc::Rc;
use std::time::Duration;
use storefront_forms::{
    Banner, FieldId, FieldState, FormConfig, FormValidator, MemoryDocument, MemoryForm,
    SimulatedSubmitter, SubmitControl, SubmitOutcome, TokioRuntime,
};
use storefront_validation::FieldAttributes;
use tokio::task::LocalSet;
use tokio::time::sleep;

type Validator = FormValidator<MemoryForm, SimulatedSubmitter<TokioRuntime>, TokioRuntime>;

const DELAY: Duration = Duration::from_millis(1500);

fn register_form() -> MemoryForm {
    MemoryForm::new("register-form")
        .with_field(FieldAttributes::named("Name").required().minlength(2), "Asha Patel")
        .with_field(FieldAttributes::named("email").kind("email").required(), "asha@example.com")
        .with_field(FieldAttributes::named("password").required().minlength(6), "Secret1")
        .with_field(FieldAttributes::named("password2").required().confirm("password"), "Secret1")
        .with_plain("referral", "friend")
        .with_submit("Create account")
}

fn attach(form: MemoryForm) -> Validator {
    let id = form.id();
    let page = MemoryDocument::new().with_form(form);
    FormValidator::attach(
        &page,
        &id,
        SimulatedSubmitter::new(TokioRuntime, DELAY),
        TokioRuntime,
        FormConfig::default(),
    )
}

fn attach_failing(form: MemoryForm) -> Validator {
    FormValidator::new(
        form,
        SimulatedSubmitter::failing(TokioRuntime, DELAY, "connection reset"),
        TokioRuntime,
        FormConfig::default(),
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn field(v: &Validator, name: &str) -> FieldId {
    v.field_id(name).unwrap()
}

#[test]
fn missing_form_makes_validator_inert() {
    let page = MemoryDocument::new().with_form(register_form());
    let v: Validator = FormValidator::attach(
        &page,
        "login-form",
        SimulatedSubmitter::new(TokioRuntime, DELAY),
        TokioRuntime,
        FormConfig::default(),
    );
    assert!(v.is_inert());
    assert_eq!(v.field_count(), 0);
    assert!(v.handle_blur(FieldId::new(0)));
    v.handle_input(FieldId::new(0));
}

#[tokio::test]
async fn inert_validator_ignores_submit() {
    let v = attach(register_form());
    v.detach();
    assert!(v.is_inert());
    assert_eq!(v.handle_submit().await, SubmitOutcome::Inert);
}

#[rstest]
#[case::invalid_email("email", "bob@", "Please enter a valid email address")]
#[case::password_mismatch("password2", "Secret2", "Passwords do not match")]
#[case::whitespace_only_name("Name", "   ", "Name is required")]
fn blur_renders_first_failing_rule(#[case] name: &str, #[case] value: &str, #[case] expected: &str) {
    let form = register_form();
    let v = attach(form.clone());
    form.set_value(name, value);

    let id = field(&v, name);
    assert!(!v.handle_blur(id));
    assert_eq!(v.state(id), Some(FieldState::Error(expected.into())));
    assert_eq!(form.rendered(id), FieldState::Error(expected.into()));
    assert_eq!(form.error_message_count(id), 1);
}

#[test]
fn revalidation_replaces_previous_error() {
    let form = register_form();
    let v = attach(form.clone());
    let name = field(&v, "Name");

    form.set_value("Name", "");
    v.handle_blur(name);
    form.set_value("Name", "A");
    v.handle_blur(name);

    assert_eq!(form.error_message_count(name), 1);
    assert_eq!(
        v.state(name),
        Some(FieldState::Error("Name must be at least 2 characters".into()))
    );

    form.set_value("Name", "Al");
    assert!(v.handle_blur(name));
    assert_eq!(form.rendered(name), FieldState::Success);
    assert_eq!(form.error_message_count(name), 0);
}

#[tokio::test]
async fn invalid_submit_renders_every_error_and_scrolls_to_first() {
    let form = register_form();
    let v = attach(form.clone());
    form.set_value("email", "bob@");
    form.set_value("password2", "nope!!");

    let outcome = v.handle_submit().await;

    let email = field(&v, "email");
    let confirm = field(&v, "password2");
    assert_eq!(outcome, SubmitOutcome::Invalid { first_error: Some(email) });
    assert!(v.state(email).unwrap().is_error());
    assert!(v.state(confirm).unwrap().is_error());
    assert!(v.state(field(&v, "Name")).unwrap().is_success());
    assert_eq!(form.scrolled(), vec![email]);
    assert!(form.banners().is_empty());
    assert_eq!(
        form.submit_control(),
        Some(SubmitControl { label: "Create account".into(), disabled: false })
    );
    // Nothing was cleared
    assert_eq!(form.get_value("email").as_deref(), Some("bob@"));
}

#[tokio::test(start_paused = true)]
async fn valid_submit_full_cycle() {
    LocalSet::new()
        .run_until(async {
            let form = register_form().with_attribute("data-success-message", "Welcome aboard!");
            let v = Rc::new(attach(form.clone()));

            let running = Rc::clone(&v);
            let handle = tokio::task::spawn_local(async move { running.handle_submit().await });

            sleep(Duration::from_millis(10)).await;
            assert!(v.is_submitting());
            let busy = form.submit_control().unwrap();
            assert!(busy.disabled);
            assert_eq!(busy.label, FormConfig::default().loading_label);

            // A second attempt while in flight is ignored
            assert_eq!(v.handle_submit().await, SubmitOutcome::InFlight);

            let outcome = handle.await.unwrap();
            assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
            assert!(!v.is_submitting());
            assert_eq!(
                form.submit_control(),
                Some(SubmitControl { label: "Create account".into(), disabled: false })
            );

            let banners = form.banners();
            assert_eq!(banners.len(), 1);
            assert_eq!(banners[0].banner, Banner::success("Welcome aboard!"));
            assert!(!banners[0].fading);

            // Every control was cleared, tracked or not
            assert_eq!(form.get_value("email").as_deref(), Some(""));
            assert_eq!(form.get_value("referral").as_deref(), Some(""));

            sleep(Duration::from_millis(5001)).await;
            assert!(form.banners()[0].fading);

            sleep(Duration::from_millis(300)).await;
            assert!(form.banners().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn default_success_message_without_attribute() {
    LocalSet::new()
        .run_until(async {
            let form = register_form();
            let v = attach(form.clone());
            assert!(matches!(v.handle_submit().await, SubmitOutcome::Submitted { .. }));
            assert_eq!(
                form.banners()[0].banner,
                Banner::success("Thank you! Your message has been sent successfully.")
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn failed_submit_shows_error_banner_and_restores_control() {
    LocalSet::new()
        .run_until(async {
            init_tracing();
            let form = register_form();
            let v = attach_failing(form.clone());

            let outcome = v.handle_submit().await;
            assert!(matches!(outcome, SubmitOutcome::Failed { .. }));

            let banners = form.banners();
            assert_eq!(banners.len(), 1);
            assert_eq!(banners[0].banner, Banner::error("An error occurred. Please try again."));
            assert_eq!(
                form.submit_control(),
                Some(SubmitControl { label: "Create account".into(), disabled: false })
            );
            assert!(!v.is_submitting());
            // Field values survive a failed submission
            assert_eq!(form.get_value("email").as_deref(), Some("asha@example.com"));

            sleep(Duration::from_millis(5301)).await;
            assert!(form.banners().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn form_without_submit_control_still_submits() {
    LocalSet::new()
        .run_until(async {
            let form = MemoryForm::new("newsletter-form")
                .with_field(FieldAttributes::named("email").kind("email").required(), "a@b.co");
            let v = attach(form.clone());
            assert!(matches!(v.handle_submit().await, SubmitOutcome::Submitted { .. }));
            assert_eq!(form.submit_control(), None);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn detach_cancels_pending_banner_dismissal() {
    LocalSet::new()
        .run_until(async {
            let form = register_form();
            let v = attach(form.clone());
            assert!(matches!(v.handle_submit().await, SubmitOutcome::Submitted { .. }));

            v.detach();
            sleep(Duration::from_secs(10)).await;
            assert_eq!(form.banners().len(), 1);
            assert!(!form.banners()[0].fading);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn banner_removed_by_host_is_left_alone() {
    LocalSet::new()
        .run_until(async {
            let form = register_form();
            let v = attach(form.clone());
            assert!(matches!(v.handle_submit().await, SubmitOutcome::Submitted { .. }));

            form.clear_banners();
            sleep(Duration::from_secs(10)).await;
            assert!(form.banners().is_empty());
        })
        .await;
}
