//! Face detection, similarity, grouping, identification and verification.

use super::endpoints;
use super::{ApiContext, PersonClient, PersonGroupClient};
use crate::config::TrainingConfig;
use crate::error::Result;
use crate::transport::ImageSource;
use crate::types::{
    DetectOptions, DetectedFace, GroupingResult, IdentifyResult, SimilarFace, VerifyResult,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindSimilarBody<'a> {
    face_id: &'a str,
    face_ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupingBody<'a> {
    face_ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyBody<'a> {
    face_ids: &'a [String],
    person_group_id: &'a str,
    max_num_of_candidates_returned: u32,
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    #[serde(rename = "faceId1")]
    face_id1: &'a str,
    #[serde(rename = "faceId2")]
    face_id2: &'a str,
}

/// Client for the face APIs.
///
/// Also carries the person and person group clients, which live under the
/// same remote resource family.
#[derive(Clone)]
pub struct FaceClient {
    ctx: ApiContext,
    person: PersonClient,
    person_group: PersonGroupClient,
}

impl FaceClient {
    pub(crate) fn new(ctx: ApiContext, training: TrainingConfig) -> Self {
        Self {
            person: PersonClient::new(ctx.clone()),
            person_group: PersonGroupClient::new(ctx.clone(), training),
            ctx,
        }
    }

    pub fn person(&self) -> &PersonClient {
        &self.person
    }

    pub fn person_group(&self) -> &PersonGroupClient {
        &self.person_group
    }

    /// Detect human faces in an image, returning locations, landmarks and
    /// the optional attributes selected in `options`.
    ///
    /// Detection produces the face IDs used by every other face API.
    pub async fn detect(
        &self,
        source: ImageSource,
        options: &DetectOptions,
    ) -> Result<Vec<DetectedFace>> {
        let request = self
            .ctx
            .image_request(&endpoints::DETECT, source, options.to_query())
            .await?;
        Ok(self.ctx.invoker.invoke_json(request).await?.unwrap_or_default())
    }

    /// Find faces among `candidates` that look similar to `face_id`.
    pub async fn similar(&self, face_id: &str, candidates: &[String]) -> Result<Vec<SimilarFace>> {
        let body = FindSimilarBody {
            face_id,
            face_ids: candidates,
        };
        let request = self.ctx.json_request(&endpoints::FIND_SIMILAR, &[], &body)?;
        Ok(self.ctx.invoker.invoke_json(request).await?.unwrap_or_default())
    }

    /// Divide faces into groups of similar-looking faces, plus a messy group
    /// of faces similar to no other. The service accepts up to 100 faces.
    pub async fn grouping(&self, face_ids: &[String]) -> Result<Option<GroupingResult>> {
        let request = self
            .ctx
            .json_request(&endpoints::GROUPING, &[], &GroupingBody { face_ids })?;
        self.ctx.invoker.invoke_json(request).await
    }

    /// Identify persons of a trained person group from one or more faces.
    ///
    /// Candidates are ranked by confidence, at most `max_candidates` per face.
    pub async fn identify(
        &self,
        person_group_id: &str,
        face_ids: &[String],
        max_candidates: u32,
    ) -> Result<Vec<IdentifyResult>> {
        let body = IdentifyBody {
            face_ids,
            person_group_id,
            max_num_of_candidates_returned: max_candidates,
        };
        let request = self.ctx.json_request(&endpoints::IDENTIFY, &[], &body)?;
        Ok(self.ctx.invoker.invoke_json(request).await?.unwrap_or_default())
    }

    /// Decide whether two faces belong to the same person.
    pub async fn verify(&self, face_id1: &str, face_id2: &str) -> Result<Option<VerifyResult>> {
        let body = VerifyBody { face_id1, face_id2 };
        let request = self.ctx.json_request(&endpoints::VERIFY, &[], &body)?;
        self.ctx.invoker.invoke_json(request).await
    }
}
