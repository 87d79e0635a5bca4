use chrono::{Duration, Utc};

use corporate_admin::domain::types::OneTimePasscode;
use corporate_admin::error::AdminServiceError;
use corporate_admin::usecase::password_reset::{
    ForgotPasswordUseCase, RESET_MAIL_SUBJECT, ResetPasswordInput, ResetPasswordUseCase,
    reset_mail_body,
};
use corporate_admin::usecase::session::issue_token;

use crate::helpers::{
    MockAccountRepo, MockMailer, MockOtpRepo, MockTokenRepo, PASSWORD, PlainHasher, test_account,
};

const EMAIL: &str = "admin@corp.test";
const NEW_PASSWORD: &str = "brand-new-pass";

fn otp_aged(code: &str, age: Duration) -> OneTimePasscode {
    OneTimePasscode {
        email: EMAIL.to_owned(),
        code: code.to_owned(),
        created_at: Utc::now() - age,
    }
}

fn reset_input(code: &str, password: &str, confirmation: &str) -> ResetPasswordInput {
    ResetPasswordInput {
        email: Some(EMAIL.to_owned()),
        otp: Some(code.to_owned()),
        password: Some(password.to_owned()),
        password_confirmation: Some(confirmation.to_owned()),
    }
}

struct Fixture {
    accounts: MockAccountRepo,
    otps: MockOtpRepo,
    tokens: MockTokenRepo,
    mailer: MockMailer,
}

impl Fixture {
    fn new(otps: Vec<OneTimePasscode>) -> Self {
        let accounts = MockAccountRepo::new(vec![test_account(EMAIL)]);
        let tokens = MockTokenRepo::new(accounts.accounts_handle());
        Self {
            accounts,
            otps: MockOtpRepo::new(otps),
            tokens,
            mailer: MockMailer::default(),
        }
    }

    fn forgot(&self) -> ForgotPasswordUseCase<MockAccountRepo, MockOtpRepo, MockMailer> {
        ForgotPasswordUseCase {
            accounts: self.accounts.clone(),
            otps: self.otps.clone(),
            mailer: self.mailer.clone(),
        }
    }

    fn reset(&self) -> ResetPasswordUseCase<MockAccountRepo, MockOtpRepo, MockTokenRepo, PlainHasher> {
        ResetPasswordUseCase {
            accounts: self.accounts.clone(),
            otps: self.otps.clone(),
            tokens: self.tokens.clone(),
            hasher: PlainHasher,
        }
    }

    fn password_hash(&self) -> String {
        self.accounts.accounts_handle().lock().unwrap()[0]
            .password_hash
            .clone()
    }
}

#[tokio::test]
async fn should_mail_reset_code_to_known_account() {
    let fx = Fixture::new(vec![]);

    fx.forgot().execute(Some(" Admin@Corp.test ".to_owned())).await.unwrap();

    let otps = fx.otps.otps_handle().lock().unwrap().clone();
    assert_eq!(otps.len(), 1);
    assert_eq!(otps[0].email, EMAIL);
    assert_eq!(otps[0].code.len(), 6);

    let sent = fx.mailer.sent_handle().lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert_eq!(sent[0].subject, RESET_MAIL_SUBJECT);
    assert_eq!(sent[0].body, reset_mail_body(&otps[0].code));
}

#[tokio::test]
async fn should_answer_unknown_email_without_sending() {
    let fx = Fixture::new(vec![]);

    let result = fx.forgot().execute(Some("ghost@corp.test".to_owned())).await;

    assert!(result.is_ok(), "expected Ok, got {result:?}");
    assert!(fx.otps.otps_handle().lock().unwrap().is_empty());
    assert!(fx.mailer.sent_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_replace_pending_login_code() {
    let fx = Fixture::new(vec![otp_aged("111111", Duration::seconds(10))]);

    fx.forgot().execute(Some(EMAIL.to_owned())).await.unwrap();

    let otps = fx.otps.otps_handle().lock().unwrap().clone();
    assert_eq!(otps.len(), 1);
    let sent = fx.mailer.sent_handle().lock().unwrap().clone();
    assert_eq!(sent[0].body, reset_mail_body(&otps[0].code));
}

#[tokio::test]
async fn should_succeed_when_reset_mail_fails() {
    let mut fx = Fixture::new(vec![]);
    fx.mailer = MockMailer::failing();

    let result = fx.forgot().execute(Some(EMAIL.to_owned())).await;

    assert!(result.is_ok(), "expected Ok, got {result:?}");
    assert_eq!(fx.otps.otps_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_require_valid_email_for_forgot_password() {
    let fx = Fixture::new(vec![]);

    let missing = fx.forgot().execute(None).await;
    let malformed = fx.forgot().execute(Some("not-an-email".to_owned())).await;

    match missing {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(errors["email"], vec!["The email field is required."]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    match malformed {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(errors["email"], vec!["The email field must be a valid email address."]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reset_password_and_revoke_every_token() {
    let fx = Fixture::new(vec![otp_aged("654321", Duration::seconds(60))]);
    let account_id = fx.accounts.accounts_handle().lock().unwrap()[0].id;
    issue_token(&fx.tokens, account_id).await.unwrap();
    issue_token(&fx.tokens, account_id).await.unwrap();

    fx.reset()
        .execute(reset_input("654321", NEW_PASSWORD, NEW_PASSWORD))
        .await
        .unwrap();

    assert_eq!(fx.password_hash(), format!("hashed:{NEW_PASSWORD}"));
    assert!(fx.otps.otps_handle().lock().unwrap().is_empty());
    assert!(fx.tokens.tokens_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_accept_code_only_once() {
    let fx = Fixture::new(vec![otp_aged("654321", Duration::seconds(60))]);

    fx.reset()
        .execute(reset_input("654321", NEW_PASSWORD, NEW_PASSWORD))
        .await
        .unwrap();
    let again = fx
        .reset()
        .execute(reset_input("654321", "another-pass", "another-pass"))
        .await;

    assert!(
        matches!(again, Err(AdminServiceError::InvalidOtp)),
        "expected InvalidOtp, got {again:?}"
    );
    assert_eq!(fx.password_hash(), format!("hashed:{NEW_PASSWORD}"));
}

#[tokio::test]
async fn should_reject_wrong_code_and_keep_password() {
    let fx = Fixture::new(vec![otp_aged("654321", Duration::seconds(60))]);

    let result = fx
        .reset()
        .execute(reset_input("000000", NEW_PASSWORD, NEW_PASSWORD))
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
    assert_eq!(fx.password_hash(), format!("hashed:{PASSWORD}"));
    assert_eq!(fx.otps.otps_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_expired_code_and_keep_password() {
    let fx = Fixture::new(vec![otp_aged("654321", Duration::minutes(6))]);

    let result = fx
        .reset()
        .execute(reset_input("654321", NEW_PASSWORD, NEW_PASSWORD))
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
    assert_eq!(fx.password_hash(), format!("hashed:{PASSWORD}"));
}

#[tokio::test]
async fn should_require_confirmed_password_of_eight_characters() {
    let fx = Fixture::new(vec![otp_aged("654321", Duration::seconds(60))]);

    let result = fx
        .reset()
        .execute(ResetPasswordInput {
            email: Some(EMAIL.to_owned()),
            otp: None,
            password: Some("short".to_owned()),
            password_confirmation: Some("shorter".to_owned()),
        })
        .await;

    match result {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(errors["otp"], vec!["The otp field is required."]);
            assert_eq!(
                errors["password"],
                vec![
                    "The password field must be at least 8 characters.",
                    "The password field confirmation does not match.",
                ]
            );
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(fx.otps.otps_handle().lock().unwrap().len(), 1);
}
