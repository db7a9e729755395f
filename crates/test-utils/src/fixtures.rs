//! Shared schema and document fixtures.
//!
//! Use these when the specific shape of the schema does not matter to the
//! test; prefer inline fixtures when it does.

use workbench_engine::{build_schema, SharedSchema};

/// A film-catalogue schema with paginated root fields, a nested object
/// chain and a deprecated field.
pub const FILM_SCHEMA: &str = r#"
type Query {
    allFilms(skip: Int): [Film!]!
    allSpecies(skip: Int): [Species!]!
    allStarships(skip: Int): [Starship!]!
    film(id: ID!): Film
}

type Film {
    id: ID!
    "The film's title."
    title: String!
    director: Person
    episode: Int @deprecated(reason: "use title")
    species: [Species!]
}

type Species {
    id: ID!
    name: String!
}

type Starship {
    id: ID!
    name: String!
}

type Person {
    name: String!
}
"#;

/// A named operation with two non-null variables, valid against
/// [`FILM_SCHEMA`].
pub const NAMED_QUERY: &str = r#"query NamedQuery($filmSkip: Int!, $speciesSkip: Int!) {
  allFilms(skip: $filmSkip) {
    title
    species {
      name
    }
  }
  allSpecies(skip: $speciesSkip) {
    name
  }
}
"#;

/// Builds [`FILM_SCHEMA`] into a shared schema.
pub fn film_schema() -> SharedSchema {
    build_schema(FILM_SCHEMA, "fixtures/schema.graphql").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid() {
        let _ = film_schema();
    }
}
