use std::sync::{Arc, Mutex};

use corporate_admin::domain::repository::PasswordHasher;
use corporate_admin::domain::types::{OTP_MAX, OTP_MIN};
use corporate_admin::error::AdminServiceError;
use corporate_admin::usecase::login::{
    LoginInput, LoginUseCase, OTP_MAIL_SUBJECT, UNKNOWN_ACCOUNT_HASH, otp_mail_body,
};

use crate::helpers::{MockAccountRepo, MockMailer, MockOtpRepo, PASSWORD, PlainHasher, test_account};

fn use_case(
    accounts: MockAccountRepo,
    otps: MockOtpRepo,
    mailer: MockMailer,
) -> LoginUseCase<MockAccountRepo, MockOtpRepo, PlainHasher, MockMailer> {
    LoginUseCase {
        accounts,
        otps,
        hasher: PlainHasher,
        mailer,
    }
}

fn input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
    }
}

#[tokio::test]
async fn should_store_six_digit_code_and_mail_it() {
    let otps = MockOtpRepo::empty();
    let otps_handle = otps.otps_handle();
    let mailer = MockMailer::default();
    let sent = mailer.sent_handle();
    let uc = use_case(
        MockAccountRepo::new(vec![test_account("admin@corp.test")]),
        otps,
        mailer,
    );

    let pending = uc.execute(input("admin@corp.test", PASSWORD)).await.unwrap();

    assert_eq!(pending.email, "admin@corp.test");
    let stored = otps_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    let code: u32 = stored[0].code.parse().unwrap();
    assert!((OTP_MIN..=OTP_MAX).contains(&code), "code {code} out of range");

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "admin@corp.test");
    assert_eq!(sent[0].subject, OTP_MAIL_SUBJECT);
    assert_eq!(sent[0].body, otp_mail_body(&stored[0].code));
}

#[tokio::test]
async fn should_keep_one_row_per_email_across_logins() {
    let otps = MockOtpRepo::empty();
    let otps_handle = otps.otps_handle();
    let uc = use_case(
        MockAccountRepo::new(vec![test_account("admin@corp.test")]),
        otps,
        MockMailer::default(),
    );

    for _ in 0..3 {
        uc.execute(input("admin@corp.test", PASSWORD)).await.unwrap();
    }

    assert_eq!(otps_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_match_email_case_insensitively() {
    let uc = use_case(
        MockAccountRepo::new(vec![test_account("admin@corp.test")]),
        MockOtpRepo::empty(),
        MockMailer::default(),
    );

    let pending = uc.execute(input("  Admin@Corp.Test ", PASSWORD)).await.unwrap();

    assert_eq!(pending.email, "admin@corp.test");
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let otps = MockOtpRepo::empty();
    let otps_handle = otps.otps_handle();
    let mailer = MockMailer::default();
    let sent = mailer.sent_handle();
    let uc = use_case(
        MockAccountRepo::new(vec![test_account("admin@corp.test")]),
        otps,
        mailer,
    );

    let wrong_password = uc.execute(input("admin@corp.test", "nope-nope")).await;
    let unknown = uc.execute(input("ghost@corp.test", PASSWORD)).await;

    assert!(
        matches!(wrong_password, Err(AdminServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {wrong_password:?}"
    );
    assert!(
        matches!(unknown, Err(AdminServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {unknown:?}"
    );
    assert!(otps_handle.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

/// Records every hash it is asked to verify against.
#[derive(Clone, Default)]
struct RecordingHasher {
    verified: Arc<Mutex<Vec<String>>>,
}

impl PasswordHasher for RecordingHasher {
    async fn hash(&self, password: &str) -> Result<String, AdminServiceError> {
        PlainHasher.hash(password).await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AdminServiceError> {
        self.verified.lock().unwrap().push(hash.to_owned());
        PlainHasher.verify(password, hash).await
    }
}

#[tokio::test]
async fn should_run_password_check_for_unknown_email() {
    let hasher = RecordingHasher::default();
    let verified = Arc::clone(&hasher.verified);
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![test_account("admin@corp.test")]),
        otps: MockOtpRepo::empty(),
        hasher,
        mailer: MockMailer::default(),
    };

    let unknown = uc.execute(input("ghost@corp.test", PASSWORD)).await;
    let wrong_password = uc.execute(input("admin@corp.test", "nope-nope")).await;

    assert!(
        matches!(unknown, Err(AdminServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {unknown:?}"
    );
    assert!(
        matches!(wrong_password, Err(AdminServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {wrong_password:?}"
    );
    let verified = verified.lock().unwrap();
    assert_eq!(verified.len(), 2);
    assert_eq!(verified[0], UNKNOWN_ACCOUNT_HASH);
    assert_eq!(verified[1], test_account("admin@corp.test").password_hash);
}

#[tokio::test]
async fn should_succeed_when_mail_delivery_fails() {
    let otps = MockOtpRepo::empty();
    let otps_handle = otps.otps_handle();
    let uc = use_case(
        MockAccountRepo::new(vec![test_account("admin@corp.test")]),
        otps,
        MockMailer::failing(),
    );

    let result = uc.execute(input("admin@corp.test", PASSWORD)).await;

    assert!(result.is_ok(), "expected Ok, got {result:?}");
    assert_eq!(otps_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_require_email_and_password() {
    let uc = use_case(
        MockAccountRepo::empty(),
        MockOtpRepo::empty(),
        MockMailer::default(),
    );

    let result = uc
        .execute(LoginInput {
            email: Some("   ".to_owned()),
            password: None,
        })
        .await;

    match result {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(errors["email"], vec!["The email field is required."]);
            assert_eq!(errors["password"], vec!["The password field is required."]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let uc = use_case(
        MockAccountRepo::empty(),
        MockOtpRepo::empty(),
        MockMailer::default(),
    );

    let result = uc.execute(input("not-an-email", PASSWORD)).await;

    match result {
        Err(AdminServiceError::Validation(errors)) => {
            assert_eq!(errors["email"], vec!["The email field must be a valid email address."]);
            assert!(!errors.contains_key("password"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
