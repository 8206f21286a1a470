use crate::client::session::SessionStore;

/// What a guarded route should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The store has not been hydrated yet; render nothing.
    Pending,
    Render,
    Redirect(&'static str),
}

/// Routes that only need a signed user. Redirects to `/` otherwise.
pub fn signed_guard(store: &SessionStore) -> GuardDecision {
    if !store.is_hydrated() {
        return GuardDecision::Pending;
    }

    if store.session().signed {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect("/")
    }
}

/// Administrator routes. Guests pass only when the route is read-only;
/// everybody else signed in is sent to `/dashboard`.
pub fn admin_guard(store: &SessionStore, read_only: bool) -> GuardDecision {
    match signed_guard(store) {
        GuardDecision::Render => {}
        other => return other,
    }

    let session = store.session();
    let allowed = session
        .user
        .is_some_and(|user| user.administrator || (read_only && user.guest));

    if allowed {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect("/dashboard")
    }
}
