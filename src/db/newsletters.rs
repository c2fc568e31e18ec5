use crate::models::newsletter::Newsletter;
use crate::schema::newsletters;
use diesel::prelude::*;
use diesel::result::Error;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = newsletters)]
pub struct NewNewsletter {
    pub id: String,
    pub name: String,
    pub author_name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub image_url: String,
    pub subscriber_count: i32,
    pub frequency: String,
    pub website_url: Option<String>,
    pub rss_url: Option<String>,
}

impl From<Newsletter> for NewNewsletter {
    fn from(newsletter: Newsletter) -> Self {
        NewNewsletter {
            id: newsletter.id,
            name: newsletter.name,
            author_name: newsletter.author_name,
            description: newsletter.description,
            categories: newsletter.categories,
            image_url: newsletter.image_url,
            subscriber_count: newsletter.subscriber_count,
            frequency: newsletter.frequency,
            website_url: newsletter.website_url,
            rss_url: newsletter.rss_url,
        }
    }
}

/// Inserts newsletters, leaving already existing ids untouched.
pub fn create(conn: &mut PgConnection, new_newsletters: &[NewNewsletter]) -> Result<usize, Error> {
    diesel::insert_into(newsletters::table)
        .values(new_newsletters)
        .on_conflict(newsletters::id)
        .do_nothing()
        .execute(conn)
}

pub fn find(conn: &mut PgConnection, id: &str) -> Result<Option<Newsletter>, Error> {
    newsletters::table
        .filter(newsletters::id.eq(id))
        .first::<Newsletter>(conn)
        .optional()
}

/// Ids and feed urls of every newsletter with a non-null `rss_url`, ordered by id.
pub fn find_with_feed(conn: &mut PgConnection) -> Result<Vec<(String, String)>, Error> {
    let rows = newsletters::table
        .filter(newsletters::rss_url.is_not_null())
        .select((newsletters::id, newsletters::rss_url))
        .order(newsletters::id)
        .load::<(String, Option<String>)>(conn)?;

    let sources = rows
        .into_iter()
        .filter_map(|(id, rss_url)| rss_url.map(|url| (id, url)))
        .collect();

    Ok(sources)
}

#[cfg(test)]
pub mod tests {
    use super::NewNewsletter;
    use crate::db;
    use diesel::connection::Connection;
    use diesel::result::Error;

    pub fn build_newsletter(id: &str, rss_url: Option<&str>) -> NewNewsletter {
        NewNewsletter {
            id: id.to_string(),
            name: format!("Newsletter {id}"),
            author_name: "Author".to_string(),
            description: "Description".to_string(),
            categories: vec!["Technology".to_string()],
            image_url: "".to_string(),
            subscriber_count: 0,
            frequency: "Weekly".to_string(),
            website_url: None,
            rss_url: rss_url.map(|url| url.to_string()),
        }
    }

    #[test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    fn create_skips_existing_ids() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let newsletter = build_newsletter("nl1", Some("http://example.com/feed"));

            let first = super::create(connection, &[newsletter.clone()]).unwrap();
            let second = super::create(connection, &[newsletter]).unwrap();

            assert_eq!(first, 1);
            assert_eq!(second, 0);

            Ok(())
        });
    }

    #[test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    fn find_finds_newsletter() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            super::create(connection, &[build_newsletter("nl1", None)]).unwrap();

            let found = super::find(connection, "nl1").unwrap().unwrap();

            assert_eq!(found.id, "nl1");
            assert_eq!(found.rss_url, None);
            assert_eq!(super::find(connection, "missing").unwrap(), None);

            Ok(())
        });
    }

    #[test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    fn find_with_feed_skips_newsletters_without_feed() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let newsletters = vec![
                build_newsletter("b", Some("http://b.com/feed")),
                build_newsletter("a", Some("http://a.com/feed")),
                build_newsletter("c", None),
            ];
            super::create(connection, &newsletters).unwrap();

            let sources = super::find_with_feed(connection).unwrap();

            assert_eq!(
                sources,
                vec![
                    ("a".to_string(), "http://a.com/feed".to_string()),
                    ("b".to_string(), "http://b.com/feed".to_string())
                ]
            );

            Ok(())
        });
    }
}
