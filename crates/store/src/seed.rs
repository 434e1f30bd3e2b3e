//! Bundled seed catalog, used when the persistence port has no catalog
//! record or the record is unreadable.

use crate::catalog::placeholder_image;
use crate::types::Movie;

/// Build the fixed seed catalog.
pub fn seed_catalog() -> Vec<Movie> {
    let entries: [(u32, &str, &str, i32, f32, &str); 12] = [
        (
            1,
            "The Shawshank Redemption",
            "Drama",
            1994,
            9.3,
            "Two imprisoned men bond over a number of years, finding solace and eventual redemption.",
        ),
        (
            2,
            "The Dark Knight",
            "Action",
            2008,
            9.0,
            "Batman faces the Joker, a criminal mastermind bent on plunging Gotham into anarchy.",
        ),
        (
            3,
            "Pulp Fiction",
            "Crime",
            1994,
            8.9,
            "The lives of two mob hitmen, a boxer and a pair of diner bandits intertwine.",
        ),
        (
            4,
            "Inception",
            "Sci-Fi",
            2010,
            8.8,
            "A thief who steals corporate secrets through dream-sharing is given an inverse task.",
        ),
        (
            5,
            "Forrest Gump",
            "Drama",
            1994,
            8.8,
            "Decades of American history unfold through the eyes of a slow-witted but kind man.",
        ),
        (
            6,
            "The Matrix",
            "Sci-Fi",
            1999,
            8.7,
            "A hacker learns the world he knows is a simulation and joins a rebellion against it.",
        ),
        (
            7,
            "Goodfellas",
            "Crime",
            1990,
            8.7,
            "The rise and fall of mob associate Henry Hill across three decades.",
        ),
        (
            8,
            "Spirited Away",
            "Animation",
            2001,
            8.6,
            "A young girl wanders into a world of spirits and must work to free her parents.",
        ),
        (
            9,
            "Parasite",
            "Thriller",
            2019,
            8.5,
            "A poor family schemes its way into the employment of a wealthy household.",
        ),
        (
            10,
            "Mad Max: Fury Road",
            "Action",
            2015,
            8.1,
            "In a post-apocalyptic wasteland, a drifter and a rebel flee a tyrant in a war rig.",
        ),
        (
            11,
            "The Grand Budapest Hotel",
            "Comedy",
            2014,
            8.1,
            "A legendary concierge and his lobby boy are swept into a stolen-painting caper.",
        ),
        (
            12,
            "La La Land",
            "Romance",
            2016,
            8.0,
            "An aspiring actress and a jazz pianist chase their dreams in Los Angeles.",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, title, genre, year, rating, description)| Movie {
            id,
            title: title.to_string(),
            genre: genre.to_string(),
            year,
            rating,
            image: placeholder_image(id),
            description: description.to_string(),
        })
        .collect()
}
