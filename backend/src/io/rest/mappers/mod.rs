pub mod dish_mapper;
pub mod meal_plan_mapper;
