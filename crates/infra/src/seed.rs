//! Demo users loaded into the in-memory store at startup.

use userhub_users::{ContactDetail, NewUser};

const DEMO: &[(&str, &str, &str, &str)] = &[
    ("Ada", "Lovelace", "ada.lovelace@example.com", "0400 100 001"),
    ("Grace", "Hopper", "grace.hopper@example.com", "0400 100 002"),
    ("Alan", "Turing", "alan.turing@example.com", "0400 100 003"),
    ("Katherine", "Johnson", "katherine.johnson@example.com", "0400 100 004"),
    ("Edsger", "Dijkstra", "edsger.dijkstra@example.com", "0400 100 005"),
    ("Barbara", "Liskov", "barbara.liskov@example.com", "0400 100 006"),
    ("Donald", "Knuth", "donald.knuth@example.com", "0400 100 007"),
    ("Margaret", "Hamilton", "margaret.hamilton@example.com", "0400 100 008"),
    ("John", "Backus", "john.backus@example.com", "0400 100 009"),
    ("Frances", "Allen", "frances.allen@example.com", "0400 100 010"),
    ("Tony", "Hoare", "tony.hoare@example.com", "0400 100 011"),
    ("Radia", "Perlman", "radia.perlman@example.com", "0400 100 012"),
];

pub fn demo_users() -> Vec<NewUser> {
    DEMO.iter()
        .map(|(given, last, email, mobile)| NewUser {
            given_names: (*given).to_string(),
            last_name: (*last).to_string(),
            contact_detail: ContactDetail {
                email_address: (*email).to_string(),
                mobile_number: (*mobile).to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_users_pass_the_create_rules() {
        let users = demo_users();
        assert_eq!(users.len(), DEMO.len());
        assert!(users.iter().all(|u| {
            !u.given_names.trim().is_empty()
                && !u.last_name.trim().is_empty()
                && u.contact_detail.email_address.contains('@')
                && !u.contact_detail.mobile_number.trim().is_empty()
        }));
    }
}
