//! Typed resource endpoints
//!
//! Pass-through methods for the collections the role dashboards consume.
//! Every call goes through [`SessionClient::execute`] and inherits bearer
//! attachment and the single 401-triggered refresh retry. Approval
//! endpoints follow the backend's uniform
//! `POST /<resource>/<id>/approve/` shape.

use crate::client::SessionClient;
use reqwest::Method;
use serde_json::Value;
use vidya_http::types::{
    Achievement, ApprovalRequest, College, Decision, Department, Event, Identity, NewAchievement,
    NewEvent, NewPermissionRequest, PermissionRequest, StudentProfile,
};
use vidya_http::ClientError;

impl SessionClient {
    /// List achievements visible to the current user.
    pub async fn list_achievements(&self) -> Result<Vec<Achievement>, ClientError> {
        let req = self.request(Method::GET, "/achievements/");
        self.execute(req).await
    }

    /// List achievements awaiting review.
    pub async fn pending_achievements(&self) -> Result<Vec<Achievement>, ClientError> {
        let req = self.request(Method::GET, "/achievements/pending/");
        self.execute(req).await
    }

    /// Submit a new achievement for approval.
    pub async fn submit_achievement(
        &self,
        achievement: &NewAchievement,
    ) -> Result<Achievement, ClientError> {
        let req = self
            .request(Method::POST, "/achievements/")
            .json(achievement);
        self.execute(req).await
    }

    /// Approve or reject an achievement.
    pub async fn review_achievement(
        &self,
        id: i64,
        decision: Decision,
    ) -> Result<Value, ClientError> {
        let req = self
            .request(Method::POST, &format!("/achievements/{id}/approve/"))
            .json(&ApprovalRequest { status: decision });
        self.execute(req).await
    }

    /// List permission requests visible to the current user.
    pub async fn list_permission_requests(&self) -> Result<Vec<PermissionRequest>, ClientError> {
        let req = self.request(Method::GET, "/permission-requests/");
        self.execute(req).await
    }

    /// Submit a new permission request.
    pub async fn submit_permission_request(
        &self,
        request: &NewPermissionRequest,
    ) -> Result<PermissionRequest, ClientError> {
        let req = self
            .request(Method::POST, "/permission-requests/")
            .json(request);
        self.execute(req).await
    }

    /// Approve or reject a permission request.
    pub async fn review_permission_request(
        &self,
        id: i64,
        decision: Decision,
    ) -> Result<Value, ClientError> {
        let req = self
            .request(Method::POST, &format!("/permission-requests/{id}/approve/"))
            .json(&ApprovalRequest { status: decision });
        self.execute(req).await
    }

    /// List events for the current college.
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        let req = self.request(Method::GET, "/events/");
        self.execute(req).await
    }

    /// Create an event, pending approval.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, ClientError> {
        let req = self.request(Method::POST, "/events/").json(event);
        self.execute(req).await
    }

    /// Approve or reject an event.
    pub async fn review_event(&self, id: i64, decision: Decision) -> Result<Value, ClientError> {
        let req = self
            .request(Method::POST, &format!("/events/{id}/approve/"))
            .json(&ApprovalRequest { status: decision });
        self.execute(req).await
    }

    /// List colleges.
    pub async fn list_colleges(&self) -> Result<Vec<College>, ClientError> {
        let req = self.request(Method::GET, "/colleges/");
        self.execute(req).await
    }

    /// List departments of the current college.
    pub async fn list_departments(&self) -> Result<Vec<Department>, ClientError> {
        let req = self.request(Method::GET, "/departments/");
        self.execute(req).await
    }

    /// List heads of department.
    pub async fn list_hods(&self) -> Result<Vec<Identity>, ClientError> {
        let req = self.request(Method::GET, "/hods/");
        self.execute(req).await
    }

    /// List faculty members.
    pub async fn list_faculty(&self) -> Result<Vec<Identity>, ClientError> {
        let req = self.request(Method::GET, "/faculty/");
        self.execute(req).await
    }

    /// Fetch the current student's profile.
    pub async fn my_student_profile(&self) -> Result<StudentProfile, ClientError> {
        let req = self.request(Method::GET, "/student-profile/me/");
        self.execute(req).await
    }
}
