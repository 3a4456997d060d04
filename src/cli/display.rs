use crate::catalog::TitleInfo;
use crate::screens::movie::MovieState;
use crate::store::{Favorite, SearchHistoryItem};

pub(super) fn titles(titles: &[TitleInfo]) {
    for title in titles {
        println!("{}\t{}\t{}", title.id, year(title), title.display_title());
    }
}

pub(super) fn movie(state: &MovieState) {
    if let Some(movie) = &state.movie {
        println!("{}  {} ({})", movie.id, movie.display_title(), year(movie));
        if let Some(kind) = &movie.title_type {
            println!("Type: {}", kind.text);
        }
        if let Some(url) = movie.image_url() {
            println!("Poster: {}", url);
        }
    }
    let favorite = match state.is_favorite {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };
    println!("Favorite: {}", favorite);

    if state.notes.is_empty() {
        println!("No notes");
        return;
    }
    println!("Notes:");
    for note in &state.notes {
        println!("  [{}] {}", note.id, note.text);
    }
}

pub(super) fn favorites(favorites: &[Favorite]) {
    if favorites.is_empty() {
        println!("No favorites");
    }
    for favorite in favorites {
        println!("{}\t{}", favorite.movie_id, favorite.title);
    }
}

pub(super) fn history(items: &[SearchHistoryItem]) {
    if items.is_empty() {
        println!("No searches yet");
    }
    for item in items {
        println!("{}\t{}", item.id, item.query);
    }
}

fn year(title: &TitleInfo) -> String {
    title
        .year()
        .map(|year| year.to_string())
        .unwrap_or_else(|| "-".to_string())
}
