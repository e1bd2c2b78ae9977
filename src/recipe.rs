use serde::{Deserialize, Serialize};

/// A single step of a recipe, referenced by index during a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Short step title (e.g. "Heat the Pan")
    pub title: String,

    /// Full instruction text read to the user
    pub instruction: String,

    /// Default countdown duration for this step, in seconds
    pub timer_seconds: u32,

    /// Technique tip shown in the tip panel
    pub tip: String,
}

/// An ordered, immutable list of recipe steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> &RecipeStep {
        &self.steps[index]
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }

    /// Built-in demo recipe used when a session is started without one
    pub fn demo() -> Self {
        Self {
            name: "Perfect Scrambled Eggs".to_string(),
            steps: vec![
                RecipeStep {
                    title: "Preparation".to_string(),
                    instruction: "Crack 4 eggs into a bowl. Add a pinch of salt and pepper. \
                                  Whisk vigorously until the mixture is uniform and slightly frothy."
                        .to_string(),
                    timer_seconds: 120,
                    tip: "Use room temperature eggs for fluffier results.".to_string(),
                },
                RecipeStep {
                    title: "Heat the Pan".to_string(),
                    instruction: "Place a non-stick skillet over medium-low heat. Add 1 tablespoon \
                                  of butter and let it melt completely, swirling to coat."
                        .to_string(),
                    timer_seconds: 60,
                    tip: "Low heat is key — high heat makes eggs rubbery.".to_string(),
                },
                RecipeStep {
                    title: "Seasoning".to_string(),
                    instruction: "Pour the whisked eggs into the warm pan. Let them sit undisturbed \
                                  for 30 seconds until the edges start to set."
                        .to_string(),
                    timer_seconds: 180,
                    tip: "Don't stir immediately — let curds form naturally.".to_string(),
                },
                RecipeStep {
                    title: "Gentle Fold".to_string(),
                    instruction: "Using a spatula, gently push the eggs from the edges toward the \
                                  center. Tilt the pan to let uncooked egg flow to the edges."
                        .to_string(),
                    timer_seconds: 120,
                    tip: "Fold, don't scramble. Large soft curds are the goal.".to_string(),
                },
                RecipeStep {
                    title: "Serve".to_string(),
                    instruction: "Remove from heat while eggs are still slightly wet — carry-over \
                                  heat will finish cooking. Plate immediately and garnish with chives."
                        .to_string(),
                    timer_seconds: 60,
                    tip: "Eggs continue cooking on the plate, so slightly underdone is perfect."
                        .to_string(),
                },
            ],
        }
    }
}
