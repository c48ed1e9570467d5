//! Domain Layer - 领域层
//!
//! Redirect Context: 目标 URL 与被编码 URL 的值对象，以及重定向地址的构造

pub mod redirect;

pub use redirect::{redirect_location, RedirectError, RedirectTarget, SubjectUrl};
