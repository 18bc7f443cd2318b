//! Rule-based meal suggestions
//!
//! Pure lookup by goal, with a BMI-conditioned branch for weight loss.
//! Every plan is exactly four meals in Breakfast/Lunch/Snack/Dinner order.

use crate::categories::Goal;

/// Number of meals in a plan.
pub const MEAL_SLOTS: usize = 4;

/// Fixed meal plan for a goal; the LoseWeight plan tightens further at
/// bmi >= 30.
pub fn meal_plan(bmi: f64, goal: Goal) -> Vec<String> {
    let meals: [&str; MEAL_SLOTS] = match goal {
        Goal::GainWeight => [
            "Breakfast: Omelette + oats + peanut butter (calorie-dense)",
            "Lunch: Chicken/quinoa + vegetables + olive oil",
            "Snack: Greek yogurt + nuts (high-calorie snack)",
            "Dinner: Salmon + sweet potato + greens",
        ],
        Goal::LoseWeight if bmi >= 30.0 => [
            "Breakfast: Veg omelette + spinach (low-calorie, protein-rich)",
            "Lunch: Grilled chicken salad (light dressing)",
            "Snack: Apple + handful of almonds (small portion)",
            "Dinner: Steamed fish + non-starchy veg (small carb)",
        ],
        Goal::LoseWeight => [
            "Breakfast: Oats with berries (controlled portion)",
            "Lunch: Salad + lean protein + wholegrain side",
            "Snack: Cottage cheese or boiled egg",
            "Dinner: Grilled paneer/tofu + steamed vegetables",
        ],
        Goal::Maintain => [
            "Breakfast: Wholegrain toast + eggs + fruit",
            "Lunch: Balanced plate (protein + complex carbs + veg)",
            "Snack: Nuts + yogurt",
            "Dinner: Lean protein + complex carbs + salad",
        ],
    };
    meals.iter().map(|meal| (*meal).to_string()).collect()
}
