//! Route table for the blog pages.
//!
//! Actix matches resources in registration order, so fixed paths and the
//! `/{username}/follow/` style routes are registered before the catch-all
//! `/{username}/` and `/{username}/{post_id}/` patterns.

use actix_web::web;

use crate::inbound::http::feeds::{follow_index, group_posts, index, post_view, profile};
use crate::inbound::http::follows::{profile_follow, profile_unfollow};
use crate::inbound::http::not_found::not_found;
use crate::inbound::http::posts::{
    add_comment, create_post, edit_post, edit_post_form, new_post_form,
};
use crate::inbound::http::users::{login, login_form, logout};

/// Register the authentication, feed and authoring routes.
///
/// Session middleware and [`crate::inbound::http::state::HttpState`] must be
/// provided by the enclosing app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login)
        .service(logout)
        .service(index)
        .service(new_post_form)
        .service(create_post)
        .service(follow_index)
        .service(group_posts)
        .service(profile_follow)
        .service(profile_unfollow)
        .service(edit_post_form)
        .service(edit_post)
        .service(add_comment)
        .service(post_view)
        .service(profile)
        .default_service(web::to(not_found));
}
