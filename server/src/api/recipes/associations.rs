use crate::models::{NewIngredient, NewRecipeIngredient, NewRecipeTag, NewTag};
use crate::schema::{ingredients, recipe_ingredients, recipe_tags, tags};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// A tag or ingredient referenced by name in a recipe payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NameRef {
    pub name: String,
}

/// A tag or ingredient as embedded in a recipe response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttachedItem {
    pub id: i32,
    pub name: String,
}

/// Replace the recipe's tag set with exactly the names in the payload.
///
/// Each name is matched verbatim against the caller's existing tags (no
/// trimming, no case folding); missing ones are created. Tags dropped from
/// the set are detached, never deleted. Callers run this inside the recipe
/// write transaction.
pub fn replace_tags(
    conn: &mut PgConnection,
    recipe_id: i32,
    user_id: Uuid,
    names: &[NameRef],
) -> QueryResult<()> {
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)?;

    for item in names {
        let existing: Option<i32> = tags::table
            .filter(tags::user_id.eq(user_id))
            .filter(tags::name.eq(&item.name))
            .select(tags::id)
            .first(conn)
            .optional()?;

        let tag_id = match existing {
            Some(id) => id,
            None => diesel::insert_into(tags::table)
                .values(NewTag {
                    user_id,
                    name: &item.name,
                })
                .returning(tags::id)
                .get_result(conn)?,
        };

        // The composite PK collapses a name repeated within one payload
        diesel::insert_into(recipe_tags::table)
            .values(NewRecipeTag { recipe_id, tag_id })
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    Ok(())
}

/// Ingredient counterpart of [`replace_tags`], with identical semantics.
pub fn replace_ingredients(
    conn: &mut PgConnection,
    recipe_id: i32,
    user_id: Uuid,
    names: &[NameRef],
) -> QueryResult<()> {
    diesel::delete(
        recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
    )
    .execute(conn)?;

    for item in names {
        let existing: Option<i32> = ingredients::table
            .filter(ingredients::user_id.eq(user_id))
            .filter(ingredients::name.eq(&item.name))
            .select(ingredients::id)
            .first(conn)
            .optional()?;

        let ingredient_id = match existing {
            Some(id) => id,
            None => diesel::insert_into(ingredients::table)
                .values(NewIngredient {
                    user_id,
                    name: &item.name,
                })
                .returning(ingredients::id)
                .get_result(conn)?,
        };

        diesel::insert_into(recipe_ingredients::table)
            .values(NewRecipeIngredient {
                recipe_id,
                ingredient_id,
            })
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    Ok(())
}

/// Load attached tags for a set of recipes, keyed by recipe id.
pub fn tags_for_recipes(
    conn: &mut PgConnection,
    recipe_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<AttachedItem>>> {
    let rows: Vec<(i32, i32, String)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .order(tags::id.asc())
        .select((recipe_tags::recipe_id, tags::id, tags::name))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<AttachedItem>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        by_recipe
            .entry(recipe_id)
            .or_default()
            .push(AttachedItem { id, name });
    }
    Ok(by_recipe)
}

/// Load attached ingredients for a set of recipes, keyed by recipe id.
pub fn ingredients_for_recipes(
    conn: &mut PgConnection,
    recipe_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<AttachedItem>>> {
    let rows: Vec<(i32, i32, String)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .order(ingredients::id.asc())
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
        ))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<AttachedItem>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        by_recipe
            .entry(recipe_id)
            .or_default()
            .push(AttachedItem { id, name });
    }
    Ok(by_recipe)
}
