//! Member account service module.

mod service;

pub use service::{
    default_member_sort, ChangePassword, CreateMember, MemberService, MemberServiceConfig, UpdateMember,
    MEMBER_SORT_FIELDS,
};
