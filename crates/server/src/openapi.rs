use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatchDoc {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FileDescriptorDoc {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(ToSchema)]
pub struct AddAttachmentsDoc { pub files: Vec<FileDescriptorDoc> }

#[derive(ToSchema)]
pub struct StatusInputDoc {
    /// pending | processing | completed | rejected
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::catalog::list,
        crate::routes::catalog::categories,
        crate::routes::catalog::detail,
        crate::routes::applications::open,
        crate::routes::applications::get,
        crate::routes::applications::edit_contact,
        crate::routes::applications::add_attachments,
        crate::routes::applications::remove_attachment,
        crate::routes::applications::submit,
        crate::routes::applications::discard,
        crate::routes::admin::list,
        crate::routes::admin::stats,
        crate::routes::admin::get,
        crate::routes::admin::set_status,
    ),
    components(
        schemas(
            HealthResponse,
            ContactPatchDoc,
            FileDescriptorDoc,
            AddAttachmentsDoc,
            StatusInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "catalog"),
        (name = "applications"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.iter().any(|p| p == "/api/services/{id}"));
        assert!(paths.iter().any(|p| p == "/api/admin/requests/{id}/status"));
    }
}
