//! Persons enrolled in a person group, and their faces.

use super::endpoints;
use super::ApiContext;
use crate::error::{OxfordError, Result};
use crate::types::{CreatedPerson, Person, PersonFace};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FaceUserData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePersonBody<'a> {
    face_ids: &'a [String],
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<&'a str>,
}

// Update always sends userData, null clears it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePersonBody<'a> {
    face_ids: &'a [String],
    name: &'a str,
    user_data: Option<&'a str>,
}

/// Client for person management within a person group.
#[derive(Clone)]
pub struct PersonClient {
    ctx: ApiContext,
}

impl PersonClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Add a detected face to a person. The service keeps at most 32 faces
    /// per person, and face IDs expire about 24 hours after detection.
    pub async fn add_face(
        &self,
        person_group_id: &str,
        person_id: &str,
        face_id: &str,
        user_data: Option<&str>,
    ) -> Result<()> {
        let params = face_params(person_group_id, person_id, face_id);
        let request = self.ctx.json_request(
            &endpoints::PERSON_FACE_ADD,
            &params,
            &FaceUserData { user_data },
        )?;
        self.ctx.invoker.invoke_unit(request).await
    }

    pub async fn delete_face(
        &self,
        person_group_id: &str,
        person_id: &str,
        face_id: &str,
    ) -> Result<()> {
        let params = face_params(person_group_id, person_id, face_id);
        let request = self.ctx.request(&endpoints::PERSON_FACE_DELETE, &params);
        self.ctx.invoker.invoke_unit(request).await
    }

    pub async fn update_face(
        &self,
        person_group_id: &str,
        person_id: &str,
        face_id: &str,
        user_data: Option<&str>,
    ) -> Result<()> {
        let params = face_params(person_group_id, person_id, face_id);
        let request = self.ctx.json_request(
            &endpoints::PERSON_FACE_UPDATE,
            &params,
            &FaceUserData { user_data },
        )?;
        self.ctx.invoker.invoke_unit(request).await
    }

    /// `None` when the face is not enrolled on the person.
    pub async fn get_face(
        &self,
        person_group_id: &str,
        person_id: &str,
        face_id: &str,
    ) -> Result<Option<PersonFace>> {
        let params = face_params(person_group_id, person_id, face_id);
        let request = self.ctx.request(&endpoints::PERSON_FACE_GET, &params);
        self.ctx.invoker.invoke_json(request).await
    }

    /// Create a person and return the new person ID.
    pub async fn create(
        &self,
        person_group_id: &str,
        face_ids: &[String],
        name: &str,
        user_data: Option<&str>,
    ) -> Result<String> {
        let body = CreatePersonBody {
            face_ids,
            name,
            user_data,
        };
        let request = self.ctx.json_request(
            &endpoints::PERSON_CREATE,
            &[("personGroupId", person_group_id)],
            &body,
        )?;
        let created: Option<CreatedPerson> = self.ctx.invoker.invoke_json(request).await?;
        created
            .map(|c| c.person_id)
            .ok_or(OxfordError::UnexpectedPayload {
                expected: "created person",
                found: "empty",
            })
    }

    pub async fn delete(&self, person_group_id: &str, person_id: &str) -> Result<()> {
        let request = self.ctx.request(
            &endpoints::PERSON_DELETE,
            &person_params(person_group_id, person_id),
        );
        self.ctx.invoker.invoke_unit(request).await
    }

    pub async fn get(&self, person_group_id: &str, person_id: &str) -> Result<Option<Person>> {
        let request = self.ctx.request(
            &endpoints::PERSON_GET,
            &person_params(person_group_id, person_id),
        );
        self.ctx.invoker.invoke_json(request).await
    }

    /// Replace a person's faces, name and user data.
    pub async fn update(
        &self,
        person_group_id: &str,
        person_id: &str,
        face_ids: &[String],
        name: &str,
        user_data: Option<&str>,
    ) -> Result<()> {
        let body = UpdatePersonBody {
            face_ids,
            name,
            user_data,
        };
        let request = self.ctx.json_request(
            &endpoints::PERSON_UPDATE,
            &person_params(person_group_id, person_id),
            &body,
        )?;
        self.ctx.invoker.invoke_unit(request).await
    }

    pub async fn list(&self, person_group_id: &str) -> Result<Vec<Person>> {
        let request = self
            .ctx
            .request(&endpoints::PERSON_LIST, &[("personGroupId", person_group_id)]);
        Ok(self.ctx.invoker.invoke_json(request).await?.unwrap_or_default())
    }

    /// Update the first person named `name`, or create one if none exists.
    /// Returns the person record as it stands after the write.
    ///
    /// Read-then-write: a concurrent change between the list and the write
    /// can produce a duplicate or a lost update.
    pub async fn create_or_update(
        &self,
        person_group_id: &str,
        face_ids: &[String],
        name: &str,
        user_data: Option<&str>,
    ) -> Result<Person> {
        let persons = self.list(person_group_id).await?;
        let person_id = match persons
            .into_iter()
            .find(|p| p.name.as_deref() == Some(name))
        {
            Some(existing) => {
                tracing::debug!(person_id = %existing.person_id, "Updating existing person '{name}'");
                self.update(
                    person_group_id,
                    &existing.person_id,
                    face_ids,
                    name,
                    user_data,
                )
                .await?;
                existing.person_id
            }
            None => {
                tracing::debug!("Creating person '{name}'");
                self.create(person_group_id, face_ids, name, user_data)
                    .await?
            }
        };

        Ok(Person {
            person_id,
            name: Some(name.to_string()),
            face_ids: face_ids.to_vec(),
            user_data: user_data.map(str::to_string),
        })
    }
}

fn person_params<'a>(person_group_id: &'a str, person_id: &'a str) -> [(&'static str, &'a str); 2] {
    [("personGroupId", person_group_id), ("personId", person_id)]
}

fn face_params<'a>(
    person_group_id: &'a str,
    person_id: &'a str,
    face_id: &'a str,
) -> [(&'static str, &'a str); 3] {
    [
        ("personGroupId", person_group_id),
        ("personId", person_id),
        ("faceId", face_id),
    ]
}
