//! Session handling around the todo controller.

use super::helpers::{TrackerFixture, tracker};
use eyre::ensure;
use rstest::rstest;
use std::sync::Arc;
use yojitsu_tracker::session::{AccessToken, SessionService, StaticIdentityProvider};
use yojitsu_tracker::todo::domain::TodoFilter;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn todos_are_listed_once_authenticated(tracker: TrackerFixture) -> eyre::Result<()> {
    let session = SessionService::new(Arc::new(StaticIdentityProvider::granting(
        AccessToken::new("token-1")?,
    )));
    ensure!(!session.is_authenticated());

    session.login().await?;
    ensure!(session.is_authenticated());
    ensure!(tracker.controller.list_todos(&TodoFilter::all()).await?.is_empty());

    session.logout();
    ensure!(session.access_token().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denied_login_reports_the_reason() -> eyre::Result<()> {
    let session = SessionService::new(Arc::new(StaticIdentityProvider::denying("cancelled")));
    let result = session.login().await;
    ensure!(result.is_err());
    ensure!(!session.is_authenticated());
    Ok(())
}
