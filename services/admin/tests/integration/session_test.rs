use corporate_admin::error::AdminServiceError;
use corporate_admin::usecase::session::{AuthenticateUseCase, LogoutUseCase, issue_token};

use crate::helpers::{MockAccountRepo, MockTokenRepo, test_account};

#[tokio::test]
async fn should_resolve_issued_token_to_account() {
    let account = test_account("admin@corp.test");
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let tokens = MockTokenRepo::new(accounts.accounts_handle());

    let token = issue_token(&tokens, account.id).await.unwrap();
    let resolved = AuthenticateUseCase { tokens }.execute(&token).await.unwrap();

    assert_eq!(resolved.id, account.id);
}

#[tokio::test]
async fn should_reject_unknown_token() {
    let accounts = MockAccountRepo::new(vec![test_account("admin@corp.test")]);
    let tokens = MockTokenRepo::new(accounts.accounts_handle());

    let result = AuthenticateUseCase { tokens }.execute("not-a-token").await;

    assert!(
        matches!(result, Err(AdminServiceError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_revoke_every_token_of_the_account_on_logout() {
    let account = test_account("admin@corp.test");
    let other = test_account("other@corp.test");
    let accounts = MockAccountRepo::new(vec![account.clone(), other.clone()]);
    let tokens = MockTokenRepo::new(accounts.accounts_handle());
    let laptop = issue_token(&tokens, account.id).await.unwrap();
    let phone = issue_token(&tokens, account.id).await.unwrap();
    let others = issue_token(&tokens, other.id).await.unwrap();

    LogoutUseCase {
        tokens: tokens.clone(),
    }
    .execute(&account)
    .await
    .unwrap();

    let auth = AuthenticateUseCase { tokens };
    for revoked in [&laptop, &phone] {
        let result = auth.execute(revoked).await;
        assert!(
            matches!(result, Err(AdminServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }
    assert_eq!(auth.execute(&others).await.unwrap().id, other.id);
}
