mod call_order;
