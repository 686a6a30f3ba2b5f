//! Summary statistics over a list of blogs.
//!
//! All functions are pure and run in a single pass. Ties always go to the
//! entry or author seen first in the input, and empty input yields `None`
//! rather than a zero-filled result.

use super::models::Blog;
use serde::Serialize;
use std::collections::HashMap;

/// The most-liked blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    // ---
    pub title: String,
    pub author: String,
    pub likes: u64,
}

/// An author and how many blogs they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogCount {
    // ---
    pub author: String,
    pub blogs: u64,
}

/// An author and the likes summed over all their blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    // ---
    pub author: String,
    pub likes: u64,
}

/// Every statistic computed over the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    // ---
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogCount>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    // ---
    pub fn compute(blogs: &[Blog]) -> Self {
        // ---
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}

/// Sum of likes over all blogs. Zero for an empty list.
///
/// Saturates at `u64::MAX` instead of overflowing.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    // ---
    blogs.iter().fold(0u64, |sum, b| sum.saturating_add(b.likes))
}

/// The blog with the most likes; the first one wins a tie.
pub fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    // ---
    let mut best: Option<&Blog> = None;
    for blog in blogs {
        match best {
            Some(b) if blog.likes <= b.likes => {}
            _ => best = Some(blog),
        }
    }

    best.map(|b| FavoriteBlog {
        title: b.title.clone(),
        author: b.author.clone(),
        likes: b.likes,
    })
}

/// The author with the most blogs; the first author seen wins a tie.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogCount> {
    // ---
    first_max(group_by_author(blogs, |_| 1)).map(|(author, count)| AuthorBlogCount {
        author: author.to_string(),
        blogs: count,
    })
}

/// The author with the most likes in total; the first author seen wins a tie.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    // ---
    first_max(group_by_author(blogs, |b| b.likes)).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Likes summed per author, in first-occurrence order.
///
/// Authors are compared as exact strings, so `"Ada"` and `"ada"` are
/// different authors.
pub fn likes_by_author(blogs: &[Blog]) -> Vec<AuthorLikes> {
    // ---
    group_by_author(blogs, |b| b.likes)
        .into_iter()
        .map(|(author, likes)| AuthorLikes {
            author: author.to_string(),
            likes,
        })
        .collect()
}

/// Blog counts per author, in first-occurrence order.
pub fn blogs_by_author(blogs: &[Blog]) -> Vec<AuthorBlogCount> {
    // ---
    group_by_author(blogs, |_| 1)
        .into_iter()
        .map(|(author, count)| AuthorBlogCount {
            author: author.to_string(),
            blogs: count,
        })
        .collect()
}

/// Sums `weight` per author, saturating. The returned groups keep the order
/// in which each author first appeared, which is what the tie-breaks rely on.
fn group_by_author<F>(blogs: &[Blog], weight: F) -> Vec<(&str, u64)>
where
    F: Fn(&Blog) -> u64,
{
    // ---
    let mut groups: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for blog in blogs {
        let author = blog.author.as_str();
        match index.get(author) {
            Some(&i) => groups[i].1 = groups[i].1.saturating_add(weight(blog)),
            None => {
                index.insert(author, groups.len());
                groups.push((author, weight(blog)));
            }
        }
    }

    groups
}

/// Picks the first group holding the maximum total.
fn first_max(groups: Vec<(&str, u64)>) -> Option<(&str, u64)> {
    // ---
    groups
        .into_iter()
        .fold(None, |best, group| match best {
            Some((_, total)) if group.1 <= total => best,
            _ => Some(group),
        })
}
