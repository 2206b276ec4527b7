//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every blog endpoint, the JSON view models they return
//! and the session cookie security scheme. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Comment, Error, ErrorCode, Group, Post, User};
use crate::inbound::http::posts::{CommentFormData, PostForm, PostFormView};
use crate::inbound::http::schemas::{
    AuthorFeedSchema, CommentFormSchema, GroupFeedSchema, PostDetailSchema, PostPageSchema,
};
use crate::inbound::http::users::{LoginForm, LoginFormView};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the blog.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog API",
        description = "Posts, groups, comments and author subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::feeds::index,
        crate::inbound::http::feeds::group_posts,
        crate::inbound::http::feeds::follow_index,
        crate::inbound::http::feeds::profile,
        crate::inbound::http::feeds::post_view,
        crate::inbound::http::posts::new_post_form,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::edit_post_form,
        crate::inbound::http::posts::edit_post,
        crate::inbound::http::posts::add_comment,
        crate::inbound::http::follows::profile_follow,
        crate::inbound::http::follows::profile_unfollow,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Group,
        Post,
        Comment,
        PostPageSchema,
        GroupFeedSchema,
        AuthorFeedSchema,
        CommentFormSchema,
        PostDetailSchema,
        PostForm,
        PostFormView,
        CommentFormData,
        LoginForm,
        LoginFormView
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "feeds", description = "Paginated post listings and post detail"),
        (name = "posts", description = "Creating and editing posts, adding comments"),
        (name = "follows", description = "Author subscriptions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema(name: &str) -> RefOr<Schema> {
        ApiDoc::openapi()
            .components
            .expect("components")
            .schemas
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("schema {name} registered"))
    }

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    #[case("Post", "pubDate")]
    #[case("PostPage", "numPages")]
    #[case("AuthorFeed", "postCount")]
    #[case("PostDetail", "commentForm")]
    #[case("LoginFormView", "next")]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] field: &str) {
        assert_object_schema_has_field(&schema(name), field);
    }

    #[rstest]
    #[case("/")]
    #[case("/group/{slug}/")]
    #[case("/follow/")]
    #[case("/new/")]
    #[case("/{username}/")]
    #[case("/{username}/{post_id}/")]
    #[case("/{username}/{post_id}/edit/")]
    #[case("/{username}/{post_id}/comment")]
    #[case("/{username}/follow/")]
    #[case("/{username}/unfollow/")]
    #[case("/auth/login/")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn login_path_documents_form_and_submit() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/auth/login/").expect("login path");
        assert!(item.get.is_some(), "GET /auth/login/ documented");
        assert!(item.post.is_some(), "POST /auth/login/ documented");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
