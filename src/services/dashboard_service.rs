//! Role dashboards
//!
//! Title and navigation entries each role lands on after login.

use serde::Serialize;

use crate::models::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub name: &'static str,
    pub href: &'static str,
}

const fn entry(name: &'static str, href: &'static str) -> NavigationEntry {
    NavigationEntry { name, href }
}

pub fn dashboard_title(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin Dashboard",
        Role::Manager => "Manager Dashboard",
        Role::Secretary => "Secretary Dashboard",
        Role::Mechanic => "Mechanic Dashboard",
        Role::Proprietor => "Proprietor Dashboard",
    }
}

pub fn navigation(role: Role) -> Vec<NavigationEntry> {
    match role {
        Role::Admin => vec![
            entry("Dashboard", "/admin"),
            entry("User Management", "/admin/users"),
            entry("System Settings", "/admin/settings"),
            entry("Reports", "/admin/reports"),
            entry("Audit Logs", "/admin/logs"),
        ],
        Role::Manager => vec![
            entry("Dashboard", "/manager"),
            entry("Operations", "/manager/operations"),
            entry("Staff Oversight", "/manager/staff"),
            entry("Performance", "/manager/performance"),
            entry("Scheduling", "/manager/scheduling"),
            entry("Quality Control", "/manager/quality"),
        ],
        Role::Secretary => vec![
            entry("Dashboard", "/secretary"),
            entry("Documents", "/secretary/documents"),
            entry("Appointments", "/secretary/appointments"),
            entry("Customer Records", "/secretary/customers"),
            entry("Tasks", "/secretary/tasks"),
        ],
        Role::Mechanic => vec![
            entry("Dashboard", "/mechanic"),
            entry("Work Orders", "/mechanic/work-orders"),
            entry("Inspections", "/mechanic/inspections"),
            entry("Parts Inventory", "/mechanic/inventory"),
            entry("My Schedule", "/mechanic/schedule"),
        ],
        Role::Proprietor => vec![
            entry("Dashboard", "/proprietor"),
            entry("Analytics", "/proprietor/analytics"),
            entry("Finances", "/proprietor/finances"),
            entry("Staff Management", "/proprietor/staff"),
            entry("Business Reports", "/proprietor/reports"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_starts_at_its_dashboard() {
        for role in Role::ALL {
            let nav = navigation(role);
            assert_eq!(nav[0].name, "Dashboard");
            assert!(nav.iter().all(|e| e.href.starts_with(nav[0].href)));
        }
    }

    #[test]
    fn test_manager_navigation() {
        let names: Vec<_> = navigation(Role::Manager).into_iter().map(|e| e.name).collect();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"Quality Control"));
    }
}
