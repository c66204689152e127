pub mod sortable_list;
