//! Role predicates behind the two request gates.

use axum::http::Method;

fn is_write(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Guests may read anything but never write.
pub fn guest_may_access(guest: bool, method: &Method) -> bool {
    !(guest && is_write(method))
}

/// Administrators pass unconditionally; guests only on GET.
pub fn admin_or_guest_may_access(administrator: bool, guest: bool, method: &Method) -> bool {
    administrator || (guest && *method == Method::GET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_gate_blocks_only_guest_writes() {
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(!guest_may_access(true, &method));
            assert!(guest_may_access(false, &method));
        }
        assert!(guest_may_access(true, &Method::GET));
    }

    #[test]
    fn admin_gate_matrix() {
        assert!(admin_or_guest_may_access(true, false, &Method::POST));
        assert!(admin_or_guest_may_access(true, true, &Method::PUT));
        assert!(admin_or_guest_may_access(false, true, &Method::GET));
        assert!(!admin_or_guest_may_access(false, true, &Method::POST));
        assert!(!admin_or_guest_may_access(false, false, &Method::GET));
        assert!(!admin_or_guest_may_access(false, false, &Method::PUT));
    }
}
