use newsletter_ingest::db;
use newsletter_ingest::models::newsletter::Newsletter;

pub fn newsletter(id: &str, rss_url: Option<String>) -> Newsletter {
    Newsletter {
        id: id.to_string(),
        name: format!("Newsletter {}", id),
        author_name: "".to_string(),
        description: "".to_string(),
        categories: vec![],
        image_url: "".to_string(),
        subscriber_count: 0,
        frequency: "Weekly".to_string(),
        website_url: None,
        rss_url,
        created_at: db::current_time(),
        updated_at: db::current_time(),
    }
}

pub fn feed_url(path: &str) -> String {
    format!("{}{}", mockito::server_url(), path)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("./tests/support/{}", name)).unwrap()
}
