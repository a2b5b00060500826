//! Seed records for the in-memory catalog.

use crate::schema::{Author, Book, Photo, Tag};

pub fn books() -> Vec<Book> {
    vec![
        book(
            1,
            "The Rust Programming Language",
            560,
            "The official book on the Rust programming language.",
            &["programming", "rust"],
            ("Steve Klabnik", 38, false),
        ),
        book(
            2,
            "Dune",
            412,
            "A desert planet, a noble family and a spice everyone wants.",
            &["sci-fi", "classic"],
            ("Frank Herbert", 65, true),
        ),
        book(
            3,
            "A Brief History of Time",
            256,
            "From the big bang to black holes.",
            &["science", "history"],
            ("Stephen Hawking", 76, true),
        ),
        book(
            4,
            "Foundation",
            255,
            "Psychohistory and the fall of a galactic empire.",
            &["sci-fi"],
            ("Isaac Asimov", 72, true),
        ),
        book(
            5,
            "Game Design Workshop",
            640,
            "A playcentric approach to creating innovative games.",
            &["gaming", "design"],
            ("Tracy Fullerton", 55, false),
        ),
    ]
}

pub fn tags() -> Vec<Tag> {
    ["History", "Science", "Gaming", "Phones"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Tag {
            id,
            name: name.to_string(),
        })
        .collect()
}

pub fn photos() -> Vec<Photo> {
    [
        ("accusamus beatae ad facilis cum similique qui sunt", "92c952"),
        ("reprehenderit est deserunt velit ipsam", "771796"),
        ("officia porro iure quia iusto qui ipsa ut modi", "24f355"),
        ("culpa odio esse rerum omnis laboriosam voluptate repudiandae", "d32776"),
        ("natus nisi omnis corporis facere molestiae rerum in", "f66b97"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, color), id)| Photo {
        album_id: 1,
        id,
        title: title.to_string(),
        url: format!("https://via.placeholder.com/600/{color}"),
        thumbnail_url: format!("https://via.placeholder.com/150/{color}"),
    })
    .collect()
}

fn book(
    id: u64,
    title: &str,
    number_page: u32,
    detail: &str,
    category: &[&str],
    (name, age, retired): (&str, u32, bool),
) -> Book {
    Book {
        id,
        title: title.to_string(),
        thumbnail_url: format!("https://covers.example.com/{id}.jpg"),
        number_page,
        detail: detail.to_string(),
        category: category.iter().map(|c| c.to_string()).collect(),
        author: Author {
            name: name.to_string(),
            age,
            retired,
        },
    }
}
