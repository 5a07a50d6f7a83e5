mod bounding_box_test;
mod intersection_property_test;
