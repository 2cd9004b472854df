pub mod admin_grant;
