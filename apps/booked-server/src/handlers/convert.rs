//! Domain values to wire types.

use booked_core::domain::{Comment, Post, ReportOutcome, User};
use booked_core::services::{PostDetails, ProfileView};
use booked_shared::dto::{
    CommentResponse, PostDetailsResponse, PostResponse, ProfileResponse, ReportResponse,
    ReportStatus, UserResponse, UserSummary,
};

pub fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        created_at: user.created_at,
    }
}

pub fn user_summary(user: &User) -> UserSummary {
    UserSummary {
        id: user.id,
        username: user.username.clone(),
    }
}

pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.user_id,
        heading: post.heading.clone(),
        text: post.text.clone(),
        created_at: post.created_at,
        editable_until: post.created_at + Post::edit_window(),
    }
}

pub fn posts_response(posts: &[Post]) -> Vec<PostResponse> {
    posts.iter().map(post_response).collect()
}

pub fn comment_response(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author: comment.user_id,
        text: comment.text.clone(),
        created_at: comment.created_at,
    }
}

pub fn details_response(details: &PostDetails) -> PostDetailsResponse {
    PostDetailsResponse {
        post: post_response(&details.post),
        comments: details.comments.iter().map(comment_response).collect(),
        reported: details.reported,
    }
}

pub fn profile_response(view: &ProfileView) -> ProfileResponse {
    ProfileResponse {
        user: user_summary(&view.user),
        posts: posts_response(&view.posts),
        own_profile: view.own_profile,
        is_following: view.is_following,
        emails_enabled: view.emails_enabled,
    }
}

pub fn report_response(outcome: ReportOutcome) -> ReportResponse {
    match outcome {
        ReportOutcome::Recorded { report_count } => ReportResponse {
            status: ReportStatus::Recorded,
            report_count,
        },
        ReportOutcome::PostRemoved { report_count } => ReportResponse {
            status: ReportStatus::PostRemoved,
            report_count,
        },
    }
}
