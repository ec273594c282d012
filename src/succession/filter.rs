//! Removal of users whose domain is forbidden in restricted rooms.

use lastadmin_proto::UserId;

/// Drop every user whose domain equals one of `forbidden_domains`.
///
/// Order is preserved. An empty `forbidden_domains` keeps everyone.
pub fn filter_forbidden_domains<S: AsRef<str>>(
    users: Vec<UserId>,
    forbidden_domains: &[S],
) -> Vec<UserId> {
    if forbidden_domains.is_empty() {
        return users;
    }

    users
        .into_iter()
        .filter(|user| {
            !user.domain().is_some_and(|domain| {
                forbidden_domains
                    .iter()
                    .any(|forbidden| forbidden.as_ref() == domain)
            })
        })
        .collect()
}
