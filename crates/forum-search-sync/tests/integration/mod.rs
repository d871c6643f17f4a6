mod moderation;
mod post_lifecycle;
mod search;
