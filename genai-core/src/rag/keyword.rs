use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub year: u16,
    pub category: String,
    pub description: String,
    pub keywords: Vec<String>,
}

impl Movie {
    fn new(id: u32, title: &str, year: u16, category: &str, description: &str, keywords: &[&str]) -> Self {
        Self {
            id,
            title: title.to_string(),
            year,
            category: category.to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Relevance of this movie to the (lowercase) query words
    pub fn score(&self, words: &[String]) -> u32 {
        let title = self.title.to_lowercase();
        let description = self.description.to_lowercase();
        let category = self.category.to_lowercase();
        let keywords: Vec<String> = self.keywords.iter().map(|k| k.to_lowercase()).collect();

        words.iter().fold(0, |score, word| {
            let mut score = score;
            if keywords.iter().any(|k| k.contains(word.as_str())) {
                score += 3;
            }
            if description.contains(word.as_str()) {
                score += 2;
            }
            if title.contains(word.as_str()) {
                score += 4;
            }
            if category.contains(word.as_str()) {
                score += 2;
            }
            score
        })
    }
}

pub fn movie_catalog() -> Vec<Movie> {
    vec![
        Movie::new(
            1,
            "The Lion King",
            1994,
            "Animation, Family, Adventure",
            "A young lion named Simba embarks on a journey to reclaim his throne as the king of the Pride Lands after his father's death.",
            &["lion", "family", "adventure", "animals", "kingdom", "young", "journey"],
        ),
        Movie::new(
            2,
            "Inception",
            2010,
            "Science Fiction, Action, Thriller",
            "A group of thieves enter the dreams of their targets to steal information in this mind-bending sci-fi thriller.",
            &["dreams", "sci-fi", "thriller", "mind-bending", "thieves", "technology"],
        ),
        Movie::new(
            3,
            "Shrek",
            2001,
            "Animation, Comedy, Family",
            "An ogre named Shrek goes on a quest to rescue Princess Fiona from a dragon-guarded castle.",
            &["ogre", "dragon", "princess", "quest", "comedy", "family", "fairy tale"],
        ),
        Movie::new(
            4,
            "Finding Nemo",
            2003,
            "Animation, Family, Adventure",
            "A clownfish named Marlin searches for his lost son Nemo across the ocean with help from a forgetful fish named Dory.",
            &["fish", "ocean", "family", "adventure", "lost", "search", "underwater"],
        ),
        Movie::new(
            5,
            "The Matrix",
            1999,
            "Science Fiction, Action",
            "A computer hacker discovers that reality is a simulation and joins a rebellion against the machines.",
            &["hacker", "simulation", "reality", "machines", "rebellion", "technology"],
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieMatch<'a> {
    pub movie: &'a Movie,
    pub score: u32,
}

/// Keyword search: movies with a positive score, best first, ties in catalog order
pub fn find_similar_movies<'a>(query: &str, movies: &'a [Movie]) -> Vec<MovieMatch<'a>> {
    let words: Vec<String> = query.to_lowercase().split_whitespace().map(str::to_string).collect();

    let mut matches: Vec<MovieMatch<'a>> = movies
        .iter()
        .map(|movie| MovieMatch { movie, score: movie.score(&words) })
        .filter(|m| m.score > 0)
        .collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(target: "genai::rag", query, matches = matches.len(), "keyword search");
    matches
}

pub fn build_context(matches: &[MovieMatch<'_>], limit: usize) -> String {
    let mut context = String::from("Based on your request, here are some relevant movies from our database:\n");
    for m in matches.iter().take(limit) {
        let _ = writeln!(context, "- {} ({}): {}", m.movie.title, m.movie.year, m.movie.description);
    }
    context
}

pub fn recommendation_prompt(query: &str, context: &str) -> String {
    format!(
        "User Query: {}\n\nMovie Database Context:\n{}\n\
         Please provide a helpful recommendation based on the user's request and the movies found in our database.\n\
         Explain why these movies match what they're looking for.",
        query, context
    )
}
