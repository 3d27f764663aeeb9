#[cfg(test)]
mod tests {
    use crate::links::LinkGenerator;

    #[test]
    fn test_new_id_shape() {
        let id = LinkGenerator::default().new_id();

        assert_eq!(id.len(), 20);
        let (timestamp, suffix) = id.split_at(14);
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_new_link_uses_template() {
        let links = LinkGenerator::new("https://meet.example.org/", "Room_");
        let link = links.new_link();

        assert!(link.starts_with("https://meet.example.org/Room_"));
        assert_eq!(link.len(), "https://meet.example.org/Room_".len() + 20);
    }

    #[test]
    fn test_default_template() {
        assert_eq!(
            LinkGenerator::default().room_url_prefix(),
            "https://meet.jit.si/FitnessSession_"
        );
    }
}
