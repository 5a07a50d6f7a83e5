mod attribute_query_test;
mod planner_test;
mod radius_query_test;
