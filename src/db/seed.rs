// Reference data for the movie database: 15 well-known films with their
// box office figures (millions USD), ratings and principal cast/crew.

pub const CREATE_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    genre TEXT NOT NULL,
    director TEXT NOT NULL,
    runtime INTEGER,
    description TEXT
);

CREATE TABLE IF NOT EXISTS box_office (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL,
    domestic_revenue REAL,
    international_revenue REAL,
    total_revenue REAL,
    budget REAL,
    opening_weekend REAL,
    FOREIGN KEY (movie_id) REFERENCES movies(id)
);

CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL,
    imdb_rating REAL,
    rotten_tomatoes INTEGER,
    metacritic INTEGER,
    audience_score INTEGER,
    FOREIGN KEY (movie_id) REFERENCES movies(id)
);

CREATE TABLE IF NOT EXISTS cast (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL,
    person_name TEXT NOT NULL,
    role_type TEXT NOT NULL,
    character_name TEXT,
    FOREIGN KEY (movie_id) REFERENCES movies(id)
);
"#;

pub struct MovieRow {
    pub title: &'static str,
    pub year: i64,
    pub genre: &'static str,
    pub director: &'static str,
    pub runtime: i64,
    pub description: &'static str,
}

/// (movie_id, domestic, international, total, budget, opening_weekend)
pub type BoxOfficeRow = (i64, f64, f64, f64, f64, f64);

/// (movie_id, imdb, rotten_tomatoes, metacritic, audience_score)
pub type RatingRow = (i64, f64, i64, i64, i64);

/// (movie_id, person_name, role_type, character_name)
pub type CastRow = (i64, &'static str, &'static str, Option<&'static str>);

pub const MOVIES: [MovieRow; 15] = [
    MovieRow {
        title: "The Shawshank Redemption",
        year: 1994,
        genre: "Drama",
        director: "Frank Darabont",
        runtime: 142,
        description: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
    },
    MovieRow {
        title: "The Godfather",
        year: 1972,
        genre: "Crime",
        director: "Francis Ford Coppola",
        runtime: 175,
        description: "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
    },
    MovieRow {
        title: "The Dark Knight",
        year: 2008,
        genre: "Action",
        director: "Christopher Nolan",
        runtime: 152,
        description: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests.",
    },
    MovieRow {
        title: "Pulp Fiction",
        year: 1994,
        genre: "Crime",
        director: "Quentin Tarantino",
        runtime: 154,
        description: "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
    },
    MovieRow {
        title: "Forrest Gump",
        year: 1994,
        genre: "Drama",
        director: "Robert Zemeckis",
        runtime: 142,
        description: "The presidencies of Kennedy and Johnson, the Vietnam War, and other historical events unfold from the perspective of an Alabama man.",
    },
    MovieRow {
        title: "Inception",
        year: 2010,
        genre: "Sci-Fi",
        director: "Christopher Nolan",
        runtime: 148,
        description: "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea.",
    },
    MovieRow {
        title: "The Matrix",
        year: 1999,
        genre: "Sci-Fi",
        director: "Wachowski Brothers",
        runtime: 136,
        description: "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.",
    },
    MovieRow {
        title: "Goodfellas",
        year: 1990,
        genre: "Crime",
        director: "Martin Scorsese",
        runtime: 146,
        description: "The story of Henry Hill and his life in the mob, covering his relationship with his wife and his partners in crime.",
    },
    MovieRow {
        title: "Interstellar",
        year: 2014,
        genre: "Sci-Fi",
        director: "Christopher Nolan",
        runtime: 169,
        description: "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
    },
    MovieRow {
        title: "The Lord of the Rings: The Return of the King",
        year: 2003,
        genre: "Fantasy",
        director: "Peter Jackson",
        runtime: 201,
        description: "Gandalf and Aragorn lead the World of Men against Sauron's army to draw his gaze from Frodo and Sam as they approach Mount Doom.",
    },
    MovieRow {
        title: "Parasite",
        year: 2019,
        genre: "Thriller",
        director: "Bong Joon-ho",
        runtime: 132,
        description: "Greed and class discrimination threaten the newly formed symbiotic relationship between the wealthy Park family and the destitute Kim clan.",
    },
    MovieRow {
        title: "Gladiator",
        year: 2000,
        genre: "Action",
        director: "Ridley Scott",
        runtime: 155,
        description: "A former Roman General sets out to exact vengeance against the corrupt emperor who murdered his family and sent him into slavery.",
    },
    MovieRow {
        title: "The Silence of the Lambs",
        year: 1991,
        genre: "Thriller",
        director: "Jonathan Demme",
        runtime: 118,
        description: "A young FBI cadet must receive the help of an incarcerated cannibal killer to catch another serial killer.",
    },
    MovieRow {
        title: "Saving Private Ryan",
        year: 1998,
        genre: "War",
        director: "Steven Spielberg",
        runtime: 169,
        description: "Following the Normandy Landings, a group of U.S. soldiers go behind enemy lines to retrieve a paratrooper.",
    },
    MovieRow {
        title: "Avengers: Endgame",
        year: 2019,
        genre: "Action",
        director: "Russo Brothers",
        runtime: 181,
        description: "After the devastating events of Infinity War, the Avengers assemble once more to reverse Thanos' actions and restore balance to the universe.",
    },
];

pub const BOX_OFFICE: [BoxOfficeRow; 15] = [
    (1, 16.0, 12.3, 28.3, 25.0, 0.7),
    (2, 134.8, 111.2, 246.0, 6.0, 0.3),
    (3, 535.2, 469.8, 1005.0, 185.0, 158.4),
    (4, 107.9, 106.0, 213.9, 8.0, 9.3),
    (5, 330.3, 347.9, 678.2, 55.0, 24.5),
    (6, 292.6, 544.2, 836.8, 160.0, 62.8),
    (7, 171.5, 293.8, 465.3, 63.0, 27.8),
    (8, 46.8, 0.0, 46.8, 25.0, 6.4),
    (9, 188.0, 489.5, 677.5, 165.0, 47.5),
    (10, 377.8, 742.1, 1119.9, 94.0, 72.6),
    (11, 53.4, 205.4, 258.8, 11.4, 2.0),
    (12, 187.7, 272.8, 460.5, 103.0, 34.8),
    (13, 130.7, 142.0, 272.7, 19.0, 13.8),
    (14, 217.0, 264.8, 481.8, 70.0, 30.6),
    (15, 858.4, 1939.4, 2797.8, 356.0, 357.1),
];

pub const RATINGS: [RatingRow; 15] = [
    (1, 9.3, 91, 82, 98),
    (2, 9.2, 97, 100, 98),
    (3, 9.0, 94, 84, 94),
    (4, 8.9, 92, 94, 96),
    (5, 8.8, 71, 82, 95),
    (6, 8.8, 87, 74, 91),
    (7, 8.7, 88, 73, 85),
    (8, 8.7, 96, 90, 97),
    (9, 8.6, 72, 74, 86),
    (10, 8.9, 93, 94, 86),
    (11, 8.6, 98, 96, 93),
    (12, 8.5, 79, 67, 86),
    (13, 8.6, 96, 85, 96),
    (14, 8.6, 93, 91, 95),
    (15, 8.4, 94, 78, 90),
];

pub const CAST: [CastRow; 60] = [
    (1, "Tim Robbins", "Actor", Some("Andy Dufresne")),
    (1, "Morgan Freeman", "Actor", Some("Ellis Boyd Redding")),
    (1, "Frank Darabont", "Director", None),
    (1, "Stephen King", "Writer", None),
    (2, "Marlon Brando", "Actor", Some("Vito Corleone")),
    (2, "Al Pacino", "Actor", Some("Michael Corleone")),
    (2, "Francis Ford Coppola", "Director", None),
    (2, "Mario Puzo", "Writer", None),
    (3, "Christian Bale", "Actor", Some("Bruce Wayne")),
    (3, "Heath Ledger", "Actor", Some("Joker")),
    (3, "Christopher Nolan", "Director", None),
    (3, "Jonathan Nolan", "Writer", None),
    (4, "John Travolta", "Actor", Some("Vincent Vega")),
    (4, "Samuel L. Jackson", "Actor", Some("Jules Winnfield")),
    (4, "Uma Thurman", "Actor", Some("Mia Wallace")),
    (4, "Quentin Tarantino", "Director", None),
    (5, "Tom Hanks", "Actor", Some("Forrest Gump")),
    (5, "Robin Wright", "Actor", Some("Jenny Curran")),
    (5, "Robert Zemeckis", "Director", None),
    (5, "Eric Roth", "Writer", None),
    (6, "Leonardo DiCaprio", "Actor", Some("Dom Cobb")),
    (6, "Joseph Gordon-Levitt", "Actor", Some("Arthur")),
    (6, "Ellen Page", "Actor", Some("Ariadne")),
    (6, "Christopher Nolan", "Director", None),
    (7, "Keanu Reeves", "Actor", Some("Neo")),
    (7, "Laurence Fishburne", "Actor", Some("Morpheus")),
    (7, "Carrie-Anne Moss", "Actor", Some("Trinity")),
    (7, "Wachowski Brothers", "Director", None),
    (8, "Robert De Niro", "Actor", Some("James Conway")),
    (8, "Ray Liotta", "Actor", Some("Henry Hill")),
    (8, "Joe Pesci", "Actor", Some("Tommy DeVito")),
    (8, "Martin Scorsese", "Director", None),
    (9, "Matthew McConaughey", "Actor", Some("Cooper")),
    (9, "Anne Hathaway", "Actor", Some("Brand")),
    (9, "Jessica Chastain", "Actor", Some("Murph")),
    (9, "Christopher Nolan", "Director", None),
    (10, "Elijah Wood", "Actor", Some("Frodo")),
    (10, "Viggo Mortensen", "Actor", Some("Aragorn")),
    (10, "Ian McKellen", "Actor", Some("Gandalf")),
    (10, "Peter Jackson", "Director", None),
    (11, "Song Kang-ho", "Actor", Some("Kim Ki-taek")),
    (11, "Lee Sun-kyun", "Actor", Some("Park Dong-ik")),
    (11, "Cho Yeo-jeong", "Actor", Some("Choi Yeon-gyo")),
    (11, "Bong Joon-ho", "Director", None),
    (12, "Russell Crowe", "Actor", Some("Maximus")),
    (12, "Joaquin Phoenix", "Actor", Some("Commodus")),
    (12, "Connie Nielsen", "Actor", Some("Lucilla")),
    (12, "Ridley Scott", "Director", None),
    (13, "Jodie Foster", "Actor", Some("Clarice Starling")),
    (13, "Anthony Hopkins", "Actor", Some("Hannibal Lecter")),
    (13, "Jonathan Demme", "Director", None),
    (13, "Ted Tally", "Writer", None),
    (14, "Tom Hanks", "Actor", Some("Captain Miller")),
    (14, "Matt Damon", "Actor", Some("Private Ryan")),
    (14, "Tom Sizemore", "Actor", Some("Sergeant Horvath")),
    (14, "Steven Spielberg", "Director", None),
    (15, "Robert Downey Jr.", "Actor", Some("Tony Stark")),
    (15, "Chris Evans", "Actor", Some("Steve Rogers")),
    (15, "Scarlett Johansson", "Actor", Some("Natasha Romanoff")),
    (15, "Russo Brothers", "Director", None),
];
