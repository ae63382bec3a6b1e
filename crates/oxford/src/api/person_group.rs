//! Person groups and their training lifecycle.

use super::endpoints;
use super::ApiContext;
use crate::config::TrainingConfig;
use crate::error::{OxfordError, Result};
use crate::types::{PersonGroup, TrainingStatus};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonGroupBody<'a> {
    name: &'a str,
    user_data: Option<&'a str>,
}

/// Client for person group management and training.
#[derive(Clone)]
pub struct PersonGroupClient {
    ctx: ApiContext,
    training: TrainingConfig,
}

impl PersonGroupClient {
    pub(crate) fn new(ctx: ApiContext, training: TrainingConfig) -> Self {
        Self { ctx, training }
    }

    /// Create a person group. Group IDs are caller-chosen and must be unique
    /// within the subscription.
    pub async fn create(&self, id: &str, name: &str, user_data: Option<&str>) -> Result<()> {
        let request = self.ctx.json_request(
            &endpoints::PERSON_GROUP_CREATE,
            &[("personGroupId", id)],
            &PersonGroupBody { name, user_data },
        )?;
        self.ctx.invoker.invoke_unit(request).await
    }

    /// Delete a person group along with every person in it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = self
            .ctx
            .request(&endpoints::PERSON_GROUP_DELETE, &[("personGroupId", id)]);
        self.ctx.invoker.invoke_unit(request).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<PersonGroup>> {
        let request = self
            .ctx
            .request(&endpoints::PERSON_GROUP_GET, &[("personGroupId", id)]);
        self.ctx.invoker.invoke_json(request).await
    }

    pub async fn update(&self, id: &str, name: &str, user_data: Option<&str>) -> Result<()> {
        let request = self.ctx.json_request(
            &endpoints::PERSON_GROUP_UPDATE,
            &[("personGroupId", id)],
            &PersonGroupBody { name, user_data },
        )?;
        self.ctx.invoker.invoke_unit(request).await
    }

    pub async fn list(&self) -> Result<Vec<PersonGroup>> {
        let request = self.ctx.request(&endpoints::PERSON_GROUP_LIST, &[]);
        Ok(self.ctx.invoker.invoke_json(request).await?.unwrap_or_default())
    }

    /// Queue a training run. The returned status is normally `running`.
    pub async fn training_start(&self, id: &str) -> Result<TrainingStatus> {
        let request = self
            .ctx
            .request(&endpoints::TRAINING_START, &[("personGroupId", id)]);
        self.expect_status(request).await
    }

    pub async fn training_status(&self, id: &str) -> Result<TrainingStatus> {
        let request = self
            .ctx
            .request(&endpoints::TRAINING_STATUS, &[("personGroupId", id)]);
        self.expect_status(request).await
    }

    async fn expect_status(
        &self,
        request: crate::transport::RequestDescriptor,
    ) -> Result<TrainingStatus> {
        self.ctx
            .invoker
            .invoke_json(request)
            .await?
            .ok_or(OxfordError::UnexpectedPayload {
                expected: "training status",
                found: "empty",
            })
    }

    /// Create the group if it does not exist, otherwise update it.
    ///
    /// Read-then-write: a concurrent create between the get and the write
    /// surfaces as a conflict error from the service.
    pub async fn create_or_update(
        &self,
        id: &str,
        name: &str,
        user_data: Option<&str>,
    ) -> Result<()> {
        match self.get(id).await? {
            None => {
                tracing::debug!(person_group_id = id, "Creating person group");
                self.create(id, name, user_data).await
            }
            Some(_) => {
                tracing::debug!(person_group_id = id, "Updating existing person group");
                self.update(id, name, user_data).await
            }
        }
    }

    /// Start training and poll until it leaves the `running` state.
    ///
    /// Polls every `training.poll_interval_ms`. Each poll bumps a counter;
    /// once it reaches `timeout_polls` (the configured default when `None`)
    /// the call fails with `TrainingTimeout`, carrying whatever status that
    /// poll returned. A poll budget of zero still polls once. A start that is
    /// already terminal is returned without polling.
    pub async fn train_and_poll_for_completion(
        &self,
        id: &str,
        timeout_polls: Option<u32>,
    ) -> Result<TrainingStatus> {
        let timeout = timeout_polls.unwrap_or(self.training.timeout_polls);
        let interval = self.training.poll_interval();

        let mut status = self.training_start(id).await?;
        let mut polls = 0u32;

        while status.is_running() {
            tokio::time::sleep(interval).await;
            status = self.training_status(id).await?;
            polls += 1;
            tracing::debug!(person_group_id = id, polls, status = %status.status, "Polled training");

            if polls >= timeout {
                tracing::warn!(person_group_id = id, polls, "Training timed out");
                return Err(OxfordError::TrainingTimeout {
                    polls,
                    last_status: status.into_value(),
                });
            }
        }

        tracing::info!(
            person_group_id = id,
            polls,
            status = %status.status,
            "Training finished"
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{context, Recorded};
    use crate::transport::testing::{empty_response, json_response, MockTransport};
    use crate::transport::{Body, RawResponse};
    use reqwest::Method;
    use serde_json::json;

    fn client(transport: MockTransport) -> (PersonGroupClient, Recorded) {
        let (ctx, requests) = context(transport);
        let training = TrainingConfig {
            poll_interval_ms: 1000,
            timeout_polls: 30,
        };
        (PersonGroupClient::new(ctx, training), requests)
    }

    fn status(value: &str) -> RawResponse {
        json_response(200, json!({"status": value}))
    }

    #[tokio::test]
    async fn test_create_body() {
        let (groups, requests) = client(MockTransport::new(vec![empty_response(200)]));
        groups.create("g1", "Friends", None).await.unwrap();

        let sent = requests.lock().unwrap();
        assert_eq!(sent[0].method, Method::PUT);
        assert_eq!(sent[0].url, "http://oxford.test/face/v0/persongroups/g1");
        assert_eq!(
            sent[0].body,
            Body::Json(json!({"name": "Friends", "userData": null}))
        );
    }

    #[tokio::test]
    async fn test_delete_encodes_group_id() {
        let (groups, requests) = client(MockTransport::new(vec![empty_response(200)]));
        groups.delete("my group").await.unwrap();

        let sent = requests.lock().unwrap();
        assert_eq!(sent[0].method, Method::DELETE);
        assert_eq!(sent[0].url, "http://oxford.test/face/v0/persongroups/my%20group");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (groups, _) = client(MockTransport::new(vec![RawResponse::new(404)]));
        assert!(groups.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list() {
        let (groups, _) = client(MockTransport::new(vec![json_response(
            200,
            json!([{"personGroupId": "g1", "name": "Friends", "userData": "x"}]),
        )]));
        let list = groups.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].user_data.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_list_tolerates_group_without_name() {
        let (groups, _) = client(MockTransport::new(vec![json_response(
            200,
            json!([
                {"personGroupId": "g1", "name": "Friends"},
                {"personGroupId": "g2"}
            ]),
        )]));
        let list = groups.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].person_group_id, "g2");
        assert!(list[1].name.is_empty());
    }

    #[tokio::test]
    async fn test_create_or_update_creates_when_missing() {
        let transport = MockTransport::new(vec![RawResponse::new(404), empty_response(200)]);
        let (groups, requests) = client(transport);

        groups.create_or_update("g1", "Friends", None).await.unwrap();

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].method, Method::PUT);
    }

    #[tokio::test]
    async fn test_create_or_update_updates_existing() {
        let transport = MockTransport::new(vec![
            json_response(200, json!({"personGroupId": "g1", "name": "Old"})),
            empty_response(200),
        ]);
        let (groups, requests) = client(transport);

        groups
            .create_or_update("g1", "New", Some("data"))
            .await
            .unwrap();

        let sent = requests.lock().unwrap();
        assert_eq!(sent[1].method, Method::PATCH);
        assert_eq!(
            sent[1].body,
            Body::Json(json!({"name": "New", "userData": "data"}))
        );
    }

    #[tokio::test]
    async fn test_training_start_empty_is_unexpected() {
        let (groups, _) = client(MockTransport::new(vec![RawResponse::new(404)]));
        let err = groups.training_start("g1").await.unwrap_err();
        assert!(matches!(err, OxfordError::UnexpectedPayload { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_train_polls_until_finished() {
        let transport =
            MockTransport::new(vec![status("running"), status("running"), status("succeeded")]);
        let (groups, requests) = client(transport);

        let result = groups
            .train_and_poll_for_completion("g1", Some(10))
            .await
            .unwrap();
        assert_eq!(result.status, "succeeded");

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(
            sent[0].url,
            "http://oxford.test/face/v0/persongroups/g1/training"
        );
        assert!(sent[1..].iter().all(|r| r.method == Method::GET));
    }

    #[tokio::test(start_paused = true)]
    async fn test_train_failure_status_is_returned() {
        let transport = MockTransport::new(vec![
            status("running"),
            json_response(200, json!({"status": "failed", "message": "no persons"})),
        ]);
        let (groups, _) = client(transport);

        let result = groups.train_and_poll_for_completion("g1", None).await.unwrap();
        assert_eq!(result.status, "failed");
        assert_eq!(result.details["message"], "no persons");
    }

    #[tokio::test(start_paused = true)]
    async fn test_train_times_out() {
        let transport = MockTransport::new(vec![status("running"), status("running")]);
        let (groups, requests) = client(transport);

        let err = groups
            .train_and_poll_for_completion("g1", Some(1))
            .await
            .unwrap_err();
        match err {
            OxfordError::TrainingTimeout { polls, last_status } => {
                assert_eq!(polls, 1);
                assert_eq!(last_status["status"], "running");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_train_finishing_on_last_allowed_poll_still_times_out() {
        let transport = MockTransport::new(vec![status("running"), status("succeeded")]);
        let (groups, requests) = client(transport);

        let err = groups
            .train_and_poll_for_completion("g1", Some(1))
            .await
            .unwrap_err();
        match err {
            OxfordError::TrainingTimeout { polls, last_status } => {
                assert_eq!(polls, 1);
                assert_eq!(last_status["status"], "succeeded");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_train_zero_poll_budget_polls_once() {
        let transport = MockTransport::new(vec![status("running"), status("running")]);
        let (groups, requests) = client(transport);

        let start = tokio::time::Instant::now();
        let err = groups
            .train_and_poll_for_completion("g1", Some(0))
            .await
            .unwrap_err();
        assert!(matches!(err, OxfordError::TrainingTimeout { polls: 1, .. }));
        assert!(start.elapsed() >= std::time::Duration::from_secs(1));

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].method, Method::GET);
    }

    #[tokio::test]
    async fn test_train_already_finished_skips_polling() {
        let (groups, requests) = client(MockTransport::new(vec![status("succeeded")]));
        let result = groups
            .train_and_poll_for_completion("g1", Some(0))
            .await
            .unwrap();
        assert_eq!(result.status, "succeeded");
        assert_eq!(requests.lock().unwrap().len(), 1);
    }
}
