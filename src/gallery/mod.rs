//! Static gallery listing shown until the artwork feed goes live.

#[derive(Debug, Clone)]
pub struct Artwork {
    pub id: i64,
    pub title: String,
    pub thumbnail_url: String,
    pub owner_name: String,
}

pub fn mock_artworks() -> Vec<Artwork> {
    vec![
        Artwork {
            id: 1,
            title: "Birch Bark".to_string(),
            thumbnail_url: "/images/demo-art/birch.jpg".to_string(),
            owner_name: "Nick G.".to_string(),
        },
        Artwork {
            id: 2,
            title: "Lichen branch from the Adirondacks".to_string(),
            thumbnail_url: "/images/demo-art/lichen_branch.jpg".to_string(),
            owner_name: "Nick G.".to_string(),
        },
        Artwork {
            id: 3,
            title: "Lichen and Branch Segment".to_string(),
            thumbnail_url: "/images/demo-art/lichen_flame.jpg".to_string(),
            owner_name: "Nick G.".to_string(),
        },
    ]
}
