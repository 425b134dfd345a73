use crate::components::icons::Film;
use crate::use_locale;
use leptos::prelude::*;
use tenpo_movies::i18n::{Message, t};
use tenpo_movies_shared::Movie;
use tenpo_movies_shared::date::format_release_date;
use tenpo_movies_shared::number::format_count;

#[component]
pub fn MovieCard(movie: Movie) -> impl IntoView {
    let locale = use_locale();

    let percent = movie.rating_percent();
    let badge_class = format!(
        "badge border-0 text-white font-bold absolute top-2 right-2 {}",
        movie.rating_tier().css_class()
    );
    let release_date = format_release_date(&movie.release_date, locale);
    let votes = format!(
        "{} {}",
        format_count(movie.vote_count, locale),
        t(locale, Message::RatingCount)
    );

    let poster = match movie.poster_url() {
        Some(src) => view! {
            <img src=src alt=movie.title.clone() loading="lazy" class="w-full h-full object-cover" />
        }
        .into_any(),
        None => view! {
            <div class="flex items-center justify-center w-full h-full text-base-content/30">
                <Film attr:class="h-12 w-12" />
            </div>
        }
        .into_any(),
    };

    let overview = (!movie.overview.is_empty()).then(|| {
        view! { <p class="text-sm text-base-content/70 line-clamp-3">{movie.overview.clone()}</p> }
    });

    view! {
        <div class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow overflow-hidden">
            <figure class="relative aspect-[2/3] bg-base-300">
                {poster}
                <span class=badge_class>{format!("{}%", percent)}</span>
            </figure>
            <div class="card-body p-4 gap-1">
                <h2 class="card-title text-base line-clamp-2" title=movie.title.clone()>
                    {movie.title.clone()}
                </h2>
                <p class="text-xs text-base-content/60">{release_date}</p>
                {overview}
                <p class="text-xs text-base-content/50">{votes}</p>
            </div>
        </div>
    }
}
